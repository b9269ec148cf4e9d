//! Lifetime simulation of energy-constrained wireless sensor networks.
//!
//! A fixed base station and a set of battery-powered motes rebuild a
//! minimum-cost routing tree every round. Link costs weigh distance against
//! residual energy, a rotating set of cluster heads attracts traffic, and
//! every selected link drains its endpoints. The network lives until all
//! motes are depleted or none can be linked any more.
//!
//! ## Crate Organization
//!
//! - `network`: node model, node arena and instance files
//! - `topology`: cost model, cluster heads, candidate links, tree builders
//! - `simulation`: round driver and the builder comparison experiment
//! - `analysis`: critical-node (articulation point) detection
//! - `config`: TOML simulation settings
//! - `error`: crate error type

pub mod analysis;
pub mod config;
pub mod error;
pub mod network;
pub mod simulation;
pub mod topology;

pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use network::{Network, Node, Point};
pub use simulation::{ComparisonReport, SimulationOutcome, Termination, compare_builders, run_simulation};
pub use topology::TreeBuilder;
