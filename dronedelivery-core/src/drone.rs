use crate::coordinates::WorldPoint;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Drone {
    pub position: WorldPoint,
    pub target: WorldPoint,
    pub size: f32,
    pub speed: f32, // world units per 60 Hz frame before upgrades
    pub is_delivering: bool,
    pub at_base: bool,
}

impl Drone {
    pub fn docked_at(base: WorldPoint, size: f32, speed: f32) -> Self {
        Self {
            position: base,
            target: base,
            size,
            speed,
            is_delivering: false,
            at_base: true,
        }
    }

    /// Snap back onto the pad with no pending flight.
    pub fn dock(&mut self, base: WorldPoint) {
        self.position = base;
        self.target = base;
        self.is_delivering = false;
        self.at_base = true;
    }

    pub fn head_to(&mut self, target: WorldPoint, delivering: bool) {
        self.target = target;
        self.is_delivering = delivering;
        self.at_base = false;
    }

    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }
}
