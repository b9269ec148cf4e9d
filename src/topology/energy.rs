//! Energy-aware link cost and consumption.
//!
//! Contains:
//! - Routing cost of a link, mixing geographic distance with the inverse of
//!   the target's residual energy
//! - Low-battery penalty and cluster-head discount applied to that cost
//! - Per-link battery drain applied when a link is selected into a tree
//!
//! Units: distances in field units, energy in the same units as `MAX_BATTERY`.

use crate::network::{Node, distance};

use super::cluster::ClusterHeads;

/// Residual energy below which routing through a mote gets penalised
/// (20% of `MAX_BATTERY`).
pub const LOW_ENERGY_THRESHOLD: f64 = 10.0;

/// Multiplier applied to the cost of a link towards a cluster head.
pub const CLUSTER_HEAD_DISCOUNT: f64 = 0.7;

/// Drain multiplier for a cluster head receiving traffic (coordination overhead).
pub const CLUSTER_HEAD_RX_FACTOR: f64 = 1.2;

/// Drain multiplier for an ordinary mote relaying traffic.
pub const RELAY_RX_FACTOR: f64 = 0.5;

/// Fallback epsilon when the configured one is unusable.
const EPSILON_FLOOR: f64 = 1e-9;

/// Parameters of the cost and consumption model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyModel {
    /// Weight of distance against energy scarcity, in `[0, 1]`.
    pub beta: f64,
    /// Floor added to the residual energy before inversion.
    pub epsilon: f64,
    /// Energy spent per unit of link length.
    pub base_rate: f64,
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self {
            beta: 0.5,
            epsilon: 1e-4,
            base_rate: 0.01,
        }
    }
}

impl EnergyModel {
    pub fn with_beta(beta: f64) -> Self {
        Self { beta, ..Self::default() }
    }

    /// Routing cost of the link `sensor -> target`.
    ///
    /// # Formula
    ///
    /// ```text
    /// station target: cost = β·d
    /// mote target:    cost = β·d + (1 − β) / (E + ε)
    ///                 × (1 + (10 − E)/10)   if E < 10
    ///                 × 0.7                 if target is a cluster head
    /// ```
    ///
    /// # Returns
    ///
    /// A non-negative cost for `β ∈ [0, 1]`.
    pub fn edge_cost(&self, sensor: &Node, target: &Node, heads: &ClusterHeads) -> f64 {
        let d = distance(sensor.position(), target.position());

        let energy = match target.battery() {
            None => return self.beta * d,
            Some(battery) => battery,
        };

        let eps = if self.epsilon > 0.0 { self.epsilon } else { EPSILON_FLOOR };
        let mut denom = energy + eps;
        if denom == 0.0 {
            denom = eps;
        }

        let energy_term = 1.0 / denom;
        let mut cost = self.beta * d + (1.0 - self.beta) * energy_term;

        if energy < LOW_ENERGY_THRESHOLD {
            cost *= 1.0 + (LOW_ENERGY_THRESHOLD - energy) / LOW_ENERGY_THRESHOLD;
        }

        if heads.contains(&target.id()) {
            cost *= CLUSTER_HEAD_DISCOUNT;
        }

        cost
    }

    /// Drain both endpoints of a link that was selected into a tree.
    ///
    /// The sender pays `base_rate · d`; the receiver pays that amount scaled by
    /// `CLUSTER_HEAD_RX_FACTOR` if it is a cluster head, `RELAY_RX_FACTOR`
    /// otherwise. Depleted motes and the station are left untouched.
    ///
    /// # Parameters
    ///
    /// * `nodes` - Node arena indexed by id
    /// * `sensor` - Id of the transmitting endpoint
    /// * `target` - Id of the receiving endpoint
    /// * `heads` - Cluster heads of the current round
    pub fn apply_consumption(&self, nodes: &mut [Node], sensor: usize, target: usize, heads: &ClusterHeads) {
        let transmission = self.base_rate * distance(nodes[sensor].position(), nodes[target].position());

        let tx = &mut nodes[sensor];
        if tx.is_mote() && tx.is_active() {
            tx.apply_delta(-transmission);
        }

        let rx = &mut nodes[target];
        if rx.is_mote() && rx.is_active() {
            let factor = if heads.contains(&target) { CLUSTER_HEAD_RX_FACTOR } else { RELAY_RX_FACTOR };
            rx.apply_delta(-transmission * factor);
        }
    }
}
