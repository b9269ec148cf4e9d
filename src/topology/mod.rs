//! Energy-aware routing topology.
//!
//! One round of topology construction is:
//! 1) `cluster::select_heads` picks the round's cluster heads
//! 2) `edges::build_edges` enumerates and prices candidate links
//! 3) `tree::TreeBuilder::build` selects a spanning tree and drains the
//!    endpoints of every selected link through `energy::EnergyModel`
//!
//! ## Module Organization
//!
//! - `energy`: link cost and battery consumption model
//! - `cluster`: rotating cluster-head selection
//! - `edges`: candidate link generation
//! - `union_find`: disjoint sets shared with the robustness analysis
//! - `tree`: greedy (Kruskal) and frontier (Prim) builders

pub mod cluster;
pub mod edges;
pub mod energy;
pub mod tree;
pub mod union_find;

pub use cluster::{ClusterHeads, select_heads};
pub use edges::{Edge, build_edges};
pub use energy::EnergyModel;
pub use tree::{SpanningTree, TreeBuilder, build_frontier_tree, build_greedy_tree};
pub use union_find::UnionFind;
