//! Candidate link generation for one round.

use serde::{Deserialize, Serialize};

use crate::network::{Node, within_radius};

use super::cluster::ClusterHeads;
use super::energy::EnergyModel;

/// Undirected weighted link between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub cost: f64,
}

impl Edge {
    pub fn new(u: usize, v: usize, cost: f64) -> Self {
        Self { u, v, cost }
    }
}

/// Enumerate every usable link, sorted by ascending cost.
///
/// A pair `(i, j)` with `i < j` is kept when neither endpoint is a depleted
/// mote and the nodes are within `MAX_RADIUS`. The cost is computed with `j`
/// as the receiving end. Equal costs keep enumeration order.
///
/// # Parameters
///
/// * `nodes` - Node arena indexed by id
/// * `model` - Cost parameters (β, ε)
/// * `heads` - Cluster heads of the current round (may be empty)
pub fn build_edges(nodes: &[Node], model: &EnergyModel, heads: &ClusterHeads) -> Vec<Edge> {
    let mut edges = Vec::new();

    for (i, u) in nodes.iter().enumerate() {
        if !u.is_active() {
            continue;
        }
        for v in nodes.iter().skip(i + 1) {
            if !v.is_active() || !within_radius(u.position(), v.position()) {
                continue;
            }
            edges.push(Edge::new(u.id(), v.id(), model.edge_cost(u, v, heads)));
        }
    }

    edges.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    edges
}
