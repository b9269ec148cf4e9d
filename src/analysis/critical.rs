//! Critical-node detection on the static geometric graph.
//!
//! Two independent procedures, both over links of length `<= MAX_RADIUS`
//! with battery levels and cluster heads ignored:
//! - Failure simulation: remove each station-reachable mote in turn and
//!   count how many nodes still reach the station (union-find).
//! - Articulation points: Tarjan low-link DFS over the whole graph.
//!
//! The first answers "does losing this mote cut anyone off from the station",
//! the second "does losing this mote split the graph". They agree on a
//! connected graph whose station is not itself an articulation point; any
//! other divergence is a legitimate result, not an error.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::network::{Node, STATION_ID, within_radius};
use crate::topology::UnionFind;

/// Every in-range pair `(i, j)` with `i < j`.
fn geometric_links(nodes: &[Node]) -> Vec<(usize, usize)> {
    let mut links = Vec::new();
    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            if within_radius(a.position(), b.position()) {
                links.push((i, j));
            }
        }
    }
    links
}

/// Adjacency lists of the geometric graph, neighbours in ascending id.
fn geometric_adjacency(nodes: &[Node]) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); nodes.len()];
    for (i, j) in geometric_links(nodes) {
        adjacency[i].push(j);
        adjacency[j].push(i);
    }
    adjacency
}

/// Disjoint sets of the geometric graph, optionally pretending `removed` is gone.
///
/// A removed mote ends up as a singleton, so it never counts toward the
/// station's set.
fn reachability(n: usize, links: &[(usize, usize)], removed: Option<usize>) -> UnionFind {
    let mut uf = UnionFind::new(n);
    for &(u, v) in links {
        if removed.is_some_and(|r| u == r || v == r) {
            continue;
        }
        uf.union(u, v);
    }
    uf
}

/// Motes whose failure disconnects at least one other node from the station.
///
/// Only motes that currently reach the station are tested.
///
/// # Returns
///
/// Sorted mote ids; empty for an empty network.
pub fn find_critical_by_simulation(nodes: &[Node]) -> Vec<usize> {
    let n = nodes.len();
    if n == 0 {
        return Vec::new();
    }

    let links = geometric_links(nodes);
    let mut baseline = reachability(n, &links, None);
    let baseline_count = baseline.set_size(STATION_ID);

    let mut critical = Vec::new();
    for node in nodes.iter().filter(|node| node.is_mote()) {
        let id = node.id();
        if !baseline.connected(id, STATION_ID) {
            continue;
        }
        let still_reached = reachability(n, &links, Some(id)).set_size(STATION_ID);
        // Losing only the removed mote itself is not a fragmentation.
        if still_reached < baseline_count - 1 {
            critical.push(id);
        }
    }

    critical.sort_unstable();
    critical
}

/// DFS frame: a vertex and the index of the next neighbour to visit.
struct Frame {
    node: usize,
    next: usize,
}

/// Mote articulation points of the geometric graph (Tarjan).
///
/// The DFS runs on an explicit stack, so the depth of the graph is bounded
/// only by memory. Every component is searched; the station is never
/// reported even when it is an articulation point.
pub fn find_critical_by_articulation(nodes: &[Node]) -> Vec<usize> {
    let n = nodes.len();
    let adjacency = geometric_adjacency(nodes);

    let mut discovery: Vec<Option<usize>> = vec![None; n];
    let mut low = vec![usize::MAX; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut children = vec![0usize; n];
    let mut articulation = vec![false; n];
    let mut time = 0;

    for root in 0..n {
        if discovery[root].is_some() {
            continue;
        }

        discovery[root] = Some(time);
        low[root] = time;
        time += 1;
        let mut stack = vec![Frame { node: root, next: 0 }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;

            if let Some(&v) = adjacency[u].get(frame.next) {
                frame.next += 1;
                if parent[u] == Some(v) {
                    continue;
                }
                match discovery[v] {
                    // Back edge.
                    Some(dv) => low[u] = low[u].min(dv),
                    None => {
                        parent[v] = Some(u);
                        children[u] += 1;
                        discovery[v] = Some(time);
                        low[v] = time;
                        time += 1;
                        stack.push(Frame { node: v, next: 0 });
                    }
                }
                continue;
            }

            // All neighbours of u done: propagate to its parent.
            stack.pop();
            if let Some(p) = parent[u] {
                low[p] = low[p].min(low[u]);
                if parent[p].is_some() && discovery[p].is_some_and(|dp| low[u] >= dp) {
                    articulation[p] = true;
                }
            }
        }

        if children[root] > 1 {
            articulation[root] = true;
        }
    }

    nodes
        .iter()
        .filter(|node| node.is_mote() && articulation[node.id()])
        .map(Node::id)
        .collect()
}

/// Both critical-node answers for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobustnessReport {
    pub node_count: usize,
    pub by_simulation: Vec<usize>,
    pub by_articulation: Vec<usize>,
    pub agree: bool,
}

impl RobustnessReport {
    /// No critical mote was found by either procedure.
    pub fn is_robust(&self) -> bool {
        self.by_simulation.is_empty() && self.by_articulation.is_empty()
    }
}

/// Run both procedures and compare them.
pub fn analyze_robustness(nodes: &[Node]) -> RobustnessReport {
    let by_simulation = find_critical_by_simulation(nodes);
    let by_articulation = find_critical_by_articulation(nodes);
    let agree = by_simulation == by_articulation;

    if agree {
        info!("Robustness check: {} critical motes {:?}", by_simulation.len(), by_simulation);
    } else {
        warn!(
            "Robustness check diverged: station-reachability finds {:?}, articulation points are {:?}",
            by_simulation, by_articulation
        );
    }

    RobustnessReport {
        node_count: nodes.len(),
        by_simulation,
        by_articulation,
        agree,
    }
}
