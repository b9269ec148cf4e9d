//! Comparative lifetime experiment.
//!
//! Runs every combination of tree builder and cluster-head policy on its own
//! snapshot of the input network, plus a robustness check of the untouched
//! deployment, and collects the results into one serializable report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{RobustnessReport, analyze_robustness};
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::network::Network;
use crate::topology::TreeBuilder;

use super::driver::{SimulationOutcome, Termination, run_simulation};

/// Headline numbers of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub label: String,
    pub builder: TreeBuilder,
    pub use_heads: bool,
    pub rounds: usize,
    pub active_motes: usize,
    pub remaining_battery: f64,
    pub termination: Termination,
}

impl RunSummary {
    fn from_outcome(outcome: &SimulationOutcome) -> Self {
        Self {
            label: run_label(outcome.builder, outcome.use_heads),
            builder: outcome.builder,
            use_heads: outcome.use_heads,
            rounds: outcome.rounds_executed,
            active_motes: outcome.active_motes,
            remaining_battery: outcome.total_battery,
            termination: outcome.termination,
        }
    }
}

/// Human-readable name of a run configuration, e.g. `greedy+heads`.
pub fn run_label(builder: TreeBuilder, use_heads: bool) -> String {
    if use_heads { format!("{}+heads", builder) } else { builder.to_string() }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub mote_count: usize,
    pub config: SimulationConfig,
    pub robustness: RobustnessReport,
    pub runs: Vec<RunSummary>,
    /// Label of the run with the most rounds (first listed wins ties).
    pub best: Option<String>,
}

impl ComparisonReport {
    pub fn run(&self, builder: TreeBuilder, use_heads: bool) -> Option<&RunSummary> {
        self.runs.iter().find(|r| r.builder == builder && r.use_heads == use_heads)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run greedy and frontier builders, each with and without cluster heads.
///
/// `network` is never mutated; each run works on its own snapshot. Order of
/// runs: greedy+heads, greedy, frontier+heads, frontier.
pub fn compare_builders(network: &Network, config: &SimulationConfig) -> ComparisonReport {
    let robustness = analyze_robustness(network.nodes());

    let mut runs = Vec::with_capacity(4);
    for builder in TreeBuilder::ALL {
        for use_heads in [true, false] {
            let mut snapshot = network.snapshot();
            let outcome = run_simulation(&mut snapshot, config, builder, use_heads);
            runs.push(RunSummary::from_outcome(&outcome));
        }
    }

    let best = runs
        .iter()
        .fold(None::<&RunSummary>, |best, run| match best {
            Some(b) if b.rounds >= run.rounds => Some(b),
            _ => Some(run),
        })
        .map(|run| run.label.clone());

    ComparisonReport {
        generated_at: Utc::now(),
        mote_count: network.mote_count(),
        config: config.clone(),
        robustness,
        runs,
        best,
    }
}
