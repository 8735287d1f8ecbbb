use serde::{Deserialize, Serialize};

/// A point on the canvas, in world units (one unit per canvas pixel).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset_to(self, other: WorldPoint) -> (f32, f32) {
        (other.x - self.x, other.y - self.y)
    }

    pub fn distance(self, other: WorldPoint) -> f32 {
        let (dx, dy) = self.offset_to(other);
        (dx * dx + dy * dy).sqrt()
    }

    /// True when both axis offsets are strictly below `tolerance`.
    pub fn within_box(self, other: WorldPoint, tolerance: f32) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn within_box_is_strict() {
        let base = WorldPoint::new(100.0, 100.0);
        assert!(WorldPoint::new(104.9, 95.1).within_box(base, 5.0));
        assert!(!WorldPoint::new(105.0, 100.0).within_box(base, 5.0));
    }
}
