//! Node model: the base station and battery-powered motes.
//!
//! Every node carries an immutable identity and position. Energy state is
//! a tagged variant rather than a type hierarchy:
//! - `NodeKind::Station` always reports `MAX_BATTERY` and ignores writes.
//! - `NodeKind::Mote` holds a battery clamped to `[0, MAX_BATTERY]` on every write.

use super::geometry::Point;

/// Battery capacity of a freshly deployed mote.
pub const MAX_BATTERY: f64 = 50.0;

/// Maximum link length between two nodes.
pub const MAX_RADIUS: f64 = 100.0;

/// Identifier reserved for the base station.
pub const STATION_ID: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Fixed sink with unlimited energy.
    Station,
    /// Battery-limited sensor.
    Mote { battery: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: usize,
    position: Point,
    kind: NodeKind,
}

impl Node {
    pub fn station(position: Point) -> Self {
        Self {
            id: STATION_ID,
            position,
            kind: NodeKind::Station,
        }
    }

    /// Build a mote; the initial battery is clamped like any later write.
    pub fn mote(id: usize, position: Point, battery: f64) -> Self {
        Self {
            id,
            position,
            kind: NodeKind::Mote {
                battery: clamp_battery(battery),
            },
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> &Point {
        &self.position
    }

    pub fn is_station(&self) -> bool {
        matches!(self.kind, NodeKind::Station)
    }

    pub fn is_mote(&self) -> bool {
        matches!(self.kind, NodeKind::Mote { .. })
    }

    /// Current energy. The station always reports full capacity.
    pub fn energy(&self) -> f64 {
        match self.kind {
            NodeKind::Station => MAX_BATTERY,
            NodeKind::Mote { battery } => battery,
        }
    }

    /// Battery level for motes, `None` for the station.
    pub fn battery(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Station => None,
            NodeKind::Mote { battery } => Some(battery),
        }
    }

    /// Battery as a percentage of `MAX_BATTERY` (always 100 for the station).
    pub fn battery_percent(&self) -> f64 {
        self.energy() / MAX_BATTERY * 100.0
    }

    /// A node can take part in a round while it has energy left.
    pub fn is_active(&self) -> bool {
        self.energy() > 0.0
    }

    /// Overwrite the battery level, clamping into `[0, MAX_BATTERY]`.
    /// No-op on the station.
    pub fn set_battery(&mut self, value: f64) {
        if let NodeKind::Mote { battery } = &mut self.kind {
            *battery = clamp_battery(value);
        }
    }

    /// Add `delta` (usually negative) to the battery. No-op on the station.
    pub fn apply_delta(&mut self, delta: f64) {
        if let NodeKind::Mote { battery } = self.kind {
            self.set_battery(battery + delta);
        }
    }
}

fn clamp_battery(value: f64) -> f64 {
    // NaN collapses to an empty battery rather than poisoning later sums.
    if value.is_nan() { 0.0 } else { value.clamp(0.0, MAX_BATTERY) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_energy_is_constant() {
        let mut station = Node::station(Point::new(0.0, 0.0));
        station.apply_delta(-1000.0);
        station.set_battery(3.0);
        assert_eq!(station.energy(), MAX_BATTERY);
        assert_eq!(station.battery(), None);
        assert_eq!(station.id(), STATION_ID);
        assert!(station.is_active());
    }

    #[test]
    fn mote_battery_is_clamped_on_every_write() {
        let mut mote = Node::mote(1, Point::new(1.0, 1.0), 80.0);
        assert_eq!(mote.energy(), MAX_BATTERY);

        mote.apply_delta(-20.0);
        assert_eq!(mote.battery(), Some(30.0));
        assert_eq!(mote.battery_percent(), 60.0);

        mote.apply_delta(-31.0);
        assert_eq!(mote.energy(), 0.0);
        assert!(!mote.is_active());

        mote.set_battery(f64::NAN);
        assert_eq!(mote.energy(), 0.0);

        mote.set_battery(51.0);
        assert_eq!(mote.energy(), MAX_BATTERY);
    }
}
