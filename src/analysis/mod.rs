//! Static robustness analysis of a deployment.
//!
//! Works on geometry only, independent of the simulation state.

pub mod critical;

pub use critical::{RobustnessReport, analyze_robustness, find_critical_by_articulation, find_critical_by_simulation};
