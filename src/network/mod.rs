//! Sensor network model.
//!
//! This module owns the node arena every other component works on:
//! - `geometry`: positions and range checks
//! - `node`: station/mote variants and battery bookkeeping
//! - `instance`: reading, writing and generating instance files
//!
//! A `Network` guarantees that node ids form the dense range `[0, n)`, that
//! `nodes()[i].id() == i`, and that the station (if any) sits at index 0.
//! Comparative runs take a `snapshot()` each so that battery mutation in one
//! run never leaks into another.

pub mod geometry;
pub mod instance;
pub mod node;

pub use geometry::{Point, distance, within_radius};
pub use node::{MAX_BATTERY, MAX_RADIUS, Node, NodeKind, STATION_ID};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    nodes: Vec<Node>,
}

impl Network {
    /// Build a network from a station position and mote positions.
    ///
    /// Motes receive ids `1..=n` in iteration order and start at `MAX_BATTERY`.
    pub fn new(station: Point, motes: impl IntoIterator<Item = Point>) -> Self {
        Self::with_batteries(station, motes.into_iter().map(|p| (p, MAX_BATTERY)))
    }

    /// Like [`Network::new`] but with an explicit starting battery per mote.
    pub fn with_batteries(station: Point, motes: impl IntoIterator<Item = (Point, f64)>) -> Self {
        let mut nodes = vec![Node::station(station)];
        for (position, battery) in motes {
            let id = nodes.len();
            nodes.push(Node::mote(id, position, battery));
        }
        Self { nodes }
    }

    /// A network without any node (not even a station).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable view for the tree builders. The slice cannot change length,
    /// so the dense-id invariant is preserved.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn station(&self) -> Option<&Node> {
        self.nodes.first().filter(|n| n.is_station())
    }

    pub fn motes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_mote())
    }

    pub fn mote_count(&self) -> usize {
        self.motes().count()
    }

    pub fn active_mote_count(&self) -> usize {
        self.motes().filter(|n| n.is_active()).count()
    }

    /// Sum of all mote batteries (the station is excluded).
    pub fn total_battery(&self) -> f64 {
        self.motes().map(Node::energy).sum()
    }

    /// Independent deep copy of the node arena for a separate run.
    pub fn snapshot(&self) -> Network {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_station_first() {
        let net = Network::new(Point::new(0.0, 0.0), [Point::new(1.0, 0.0), Point::new(2.0, 0.0)]);
        assert_eq!(net.len(), 3);
        for (i, node) in net.nodes().iter().enumerate() {
            assert_eq!(node.id(), i);
        }
        assert!(net.station().is_some());
        assert_eq!(net.mote_count(), 2);
        assert_eq!(net.total_battery(), 2.0 * MAX_BATTERY);
    }

    #[test]
    fn snapshot_is_isolated_from_original() {
        let original = Network::new(Point::new(0.0, 0.0), [Point::new(1.0, 0.0)]);
        let mut copy = original.snapshot();
        copy.nodes_mut()[1].set_battery(0.0);

        assert_eq!(copy.active_mote_count(), 0);
        assert_eq!(original.active_mote_count(), 1);
        assert_eq!(original.nodes()[1].energy(), MAX_BATTERY);
    }

    #[test]
    fn empty_network_has_no_station() {
        let net = Network::empty();
        assert!(net.is_empty());
        assert!(net.station().is_none());
        assert_eq!(net.total_battery(), 0.0);
    }
}
