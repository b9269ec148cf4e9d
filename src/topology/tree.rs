//! Routing tree construction.
//!
//! Two interchangeable builders select a minimum-cost spanning tree over the
//! candidate links of a round:
//! - `Greedy` (Kruskal): scan links by ascending cost, keep those joining two
//!   components (union-find).
//! - `Frontier` (Prim): grow a single tree from the station, each step taking
//!   the cheapest link leaving it.
//!
//! Both builders drain energy for every link they keep, exactly once, and
//! never for rejected links. Costs are computed before the round starts, so
//! draining during construction does not change the choices of the same round.
//!
//! With tied costs the two builders may pick different trees of equal total
//! cost. Each builder is deterministic for a given link order.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::network::{Node, STATION_ID};

use super::cluster::ClusterHeads;
use super::edges::Edge;
use super::energy::EnergyModel;
use super::union_find::UnionFind;

/// Selected links of one round, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanningTree {
    pub edges: Vec<Edge>,
}

impl SpanningTree {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn total_cost(&self) -> f64 {
        self.edges.iter().map(|e| e.cost).sum()
    }
}

/// Tree construction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TreeBuilder {
    /// Sorted-edge union-find construction (Kruskal).
    #[value(alias = "kruskal")]
    Greedy,
    /// Station-rooted frontier growth (Prim).
    #[value(alias = "prim")]
    Frontier,
}

impl TreeBuilder {
    pub const ALL: [TreeBuilder; 2] = [TreeBuilder::Greedy, TreeBuilder::Frontier];

    /// Build a tree over `edges` and drain the endpoints of each selected link.
    pub fn build(self, nodes: &mut [Node], edges: &[Edge], model: &EnergyModel, heads: &ClusterHeads) -> SpanningTree {
        match self {
            TreeBuilder::Greedy => build_greedy_tree(nodes, edges, model, heads),
            TreeBuilder::Frontier => build_frontier_tree(nodes, edges, model, heads),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TreeBuilder::Greedy => "greedy",
            TreeBuilder::Frontier => "frontier",
        }
    }
}

impl std::fmt::Display for TreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Kruskal over the candidate links.
///
/// Links are visited in ascending cost; ties keep their input order, so an
/// already sorted list from `build_edges` is used as is.
///
/// # Returns
///
/// A forest of at most `n - 1` links; a spanning tree when the candidate
/// graph is connected.
pub fn build_greedy_tree(nodes: &mut [Node], edges: &[Edge], model: &EnergyModel, heads: &ClusterHeads) -> SpanningTree {
    let n = nodes.len();
    let mut tree = SpanningTree::default();
    if n == 0 || edges.is_empty() {
        return tree;
    }

    let mut order: Vec<&Edge> = edges.iter().collect();
    order.sort_by(|a, b| a.cost.total_cmp(&b.cost));

    let mut uf = UnionFind::new(n);
    for edge in order {
        if uf.union(edge.u, edge.v) {
            tree.edges.push(*edge);
            model.apply_consumption(nodes, edge.u, edge.v, heads);

            if tree.len() == n - 1 {
                break;
            }
        }
    }
    tree
}

/// Prim from the station over an adjacency projection of the links.
///
/// Each step scans every (in-tree, out-of-tree) pair and takes the strictly
/// cheapest, the first one found winning ties (in-tree nodes by ascending id,
/// neighbours in link order). Stops early when nothing else is reachable, so
/// nodes disconnected from the station are left out.
pub fn build_frontier_tree(nodes: &mut [Node], edges: &[Edge], model: &EnergyModel, heads: &ClusterHeads) -> SpanningTree {
    let n = nodes.len();
    let mut tree = SpanningTree::default();
    if n == 0 || edges.is_empty() {
        return tree;
    }

    let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for edge in edges {
        adjacency[edge.u].push((edge.v, edge.cost));
        adjacency[edge.v].push((edge.u, edge.cost));
    }

    let mut in_tree = vec![false; n];
    in_tree[STATION_ID] = true;

    for _ in 1..n {
        let mut best: Option<(usize, usize, f64)> = None;

        for (i, neighbours) in adjacency.iter().enumerate() {
            if !in_tree[i] {
                continue;
            }
            for &(j, cost) in neighbours {
                if in_tree[j] {
                    continue;
                }
                if best.is_none_or(|(_, _, best_cost)| cost < best_cost) {
                    best = Some((i, j, cost));
                }
            }
        }

        let Some((u, v, cost)) = best else {
            break;
        };
        tree.edges.push(Edge::new(u, v, cost));
        in_tree[v] = true;
        model.apply_consumption(nodes, u, v, heads);
    }
    tree
}
