//! Network lifetime simulation.
//!
//! ## Module Organization
//!
//! - `driver`: the round loop, termination states and per-round snapshots
//! - `compare`: builder/cluster-head comparison over cloned networks
//!
//! Runs are single-threaded and synchronous. Separate runs never share node
//! storage, so an external driver may execute them in parallel.

pub mod compare;
pub mod driver;

pub use compare::{ComparisonReport, RunSummary, compare_builders, run_label};
pub use driver::{RoundSnapshot, SimulationOutcome, Termination, run_simulation};
