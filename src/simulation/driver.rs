//! Round-by-round network lifetime simulation.
//!
//! High-level flow of each round:
//! 1) Select cluster heads for the round (or none, if disabled).
//! 2) Rebuild candidate links against the current batteries.
//! 3) Build the routing tree; the builder drains every selected link.
//! 4) Count active motes and check termination.
//!
//! Rounds are strictly sequential: round k prices its links with the
//! batteries left by round k-1.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::network::Network;
use crate::topology::{ClusterHeads, Edge, TreeBuilder, build_edges, select_heads};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Every mote ran out of battery.
    Depleted,
    /// Motes remain but no link could be built.
    Disconnected,
    /// The configured round budget was reached first.
    RoundLimit,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Termination::Depleted => "all motes depleted",
            Termination::Disconnected => "no links left",
            Termination::RoundLimit => "round limit reached",
        };
        f.write_str(text)
    }
}

/// State of the network at the end of one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round: usize,
    pub cluster_heads: ClusterHeads,
    pub tree_edges: Vec<Edge>,
    pub tree_cost: f64,
    pub active_motes: usize,
    pub total_battery: f64,
    /// Battery of every mote, in id order (station excluded).
    pub batteries: Vec<f64>,
}

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub builder: TreeBuilder,
    pub use_heads: bool,
    pub rounds_executed: usize,
    pub termination: Termination,
    pub active_motes: usize,
    pub mote_count: usize,
    pub total_battery: f64,
    /// Filled only when `record_history` is enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<RoundSnapshot>,
}

impl SimulationOutcome {
    pub fn rounds_executed(&self) -> usize {
        self.rounds_executed
    }
}

/// Run rounds on `network` in place until it is exhausted, disconnected, or
/// `config.max_rounds` rounds have executed.
///
/// # Parameters
///
/// * `network` - Node arena, mutated round after round
/// * `config` - Round budget, cost parameters and head fraction
/// * `builder` - Tree construction strategy
/// * `use_heads` - Whether to rotate cluster heads
///
/// # Returns
///
/// The outcome; round numbering starts at 1, and a network without active
/// motes ends at round 0.
pub fn run_simulation(network: &mut Network, config: &SimulationConfig, builder: TreeBuilder, use_heads: bool) -> SimulationOutcome {
    let model = config.energy_model();
    let mote_count = network.mote_count();
    let mut history = Vec::new();
    let mut rounds_executed = 0;
    let mut termination = Termination::RoundLimit;

    info!(
        "Starting {} simulation {} cluster heads: {} motes, up to {} rounds",
        builder,
        if use_heads { "with" } else { "without" },
        mote_count,
        config.max_rounds
    );

    if network.active_mote_count() == 0 {
        termination = Termination::Depleted;
    } else {
        for round in 1..=config.max_rounds {
            let heads = if use_heads {
                select_heads(network.nodes(), config.head_fraction, round)
            } else {
                ClusterHeads::new()
            };

            let edges = build_edges(network.nodes(), &model, &heads);
            let tree = builder.build(network.nodes_mut(), &edges, &model, &heads);

            let active = network.active_mote_count();
            let tree_is_empty = tree.is_empty();
            rounds_executed = round;

            debug!(
                "Round {}: heads {:?}, {} candidate links, {} tree links, {}/{} motes active, {:.2} battery left",
                round,
                heads,
                edges.len(),
                tree.len(),
                active,
                mote_count,
                network.total_battery()
            );

            if config.record_history {
                history.push(RoundSnapshot {
                    round,
                    tree_cost: tree.total_cost(),
                    tree_edges: tree.edges,
                    cluster_heads: heads,
                    active_motes: active,
                    total_battery: network.total_battery(),
                    batteries: network.motes().map(|m| m.energy()).collect(),
                });
            }

            if active == 0 {
                termination = Termination::Depleted;
                break;
            }
            if tree_is_empty {
                termination = Termination::Disconnected;
                break;
            }
        }
    }

    let outcome = SimulationOutcome {
        builder,
        use_heads,
        rounds_executed,
        termination,
        active_motes: network.active_mote_count(),
        mote_count,
        total_battery: network.total_battery(),
        history,
    };
    info!(
        "{} simulation finished after {} rounds ({}); {}/{} motes active",
        builder, outcome.rounds_executed, outcome.termination, outcome.active_motes, outcome.mote_count
    );
    if outcome.termination == Termination::Disconnected {
        warn!("Network disconnected with {} motes still holding energy", outcome.active_motes);
    }
    outcome
}
