//! Planar geometry for node placement.
//!
//! Contains helper functions for:
//! - Euclidean distance between node positions
//! - Radio range checks against `MAX_RADIUS`

use serde::{Deserialize, Serialize};

use super::node::MAX_RADIUS;

/// Simple 2D point in field units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
///
/// Uses `hypot` so that large coordinates do not overflow the intermediate
/// squares.
pub fn distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// True when two positions are close enough to share a link.
///
/// The boundary is inclusive: nodes exactly `MAX_RADIUS` apart are linked.
pub fn within_radius(a: &Point, b: &Point) -> bool {
    distance(a, b) <= MAX_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn distance_matches_pythagoras() {
        assert_eq!(distance(&p(0.0, 0.0), &p(3.0, 4.0)), 5.0);
        assert_eq!(distance(&p(-1.0, -1.0), &p(-1.0, -1.0)), 0.0);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        assert!(within_radius(&p(0.0, 0.0), &p(100.0, 0.0)));
        assert!(within_radius(&p(0.0, 0.0), &p(0.0, -100.0)));
        assert!(!within_radius(&p(0.0, 0.0), &p(100.0, 0.5)));
    }
}
