use dronedelivery_core::Drone;
use macroquad::prelude::*;

use crate::canvas::CanvasView;

#[derive(Debug, Clone)]
pub struct DroneDrawConfig {
    pub body_ratio: f32,        // body square edge as a fraction of drone size
    pub rotor_offset_ratio: f32, // rotor center distance along each axis
    pub rotor_radius_ratio: f32,
    pub camera_radius_ratio: f32,
    pub body_color: Color,
    pub rotor_color: Color,
    pub camera_color: Color,
}

impl Default for DroneDrawConfig {
    fn default() -> Self {
        Self {
            body_ratio: 1.0,
            rotor_offset_ratio: 0.75,
            rotor_radius_ratio: 0.4,
            camera_radius_ratio: 0.2,
            body_color: Color::from_rgba(30, 64, 175, 255),
            rotor_color: Color::from_rgba(59, 130, 246, 255),
            camera_color: Color::from_rgba(239, 68, 68, 255),
        }
    }
}

/// Rotor centers relative to the drone center, in canvas units.
pub fn rotor_offsets(drone_size: f32, config: &DroneDrawConfig) -> [Vec2; 4] {
    let d = drone_size * config.rotor_offset_ratio;
    [vec2(-d, -d), vec2(d, -d), vec2(-d, d), vec2(d, d)]
}

pub fn draw_drone(drone: &Drone, view: &CanvasView, config: &DroneDrawConfig) {
    let center = view.to_screen(drone.position);
    let body = view.length(drone.size * config.body_ratio);

    // Rotors first so the body overlaps their inner edges.
    let rotor_radius = view.length(drone.size * config.rotor_radius_ratio);
    for offset in rotor_offsets(drone.size, config) {
        let rotor = center + offset * view.scale;
        draw_circle(rotor.x, rotor.y, rotor_radius, config.rotor_color);
    }

    draw_rectangle(
        center.x - body * 0.5,
        center.y - body * 0.5,
        body,
        body,
        config.body_color,
    );
    draw_circle(
        center.x,
        center.y,
        view.length(drone.size * config.camera_radius_ratio).max(1.0),
        config.camera_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotors_sit_on_the_diagonals() {
        let offsets = rotor_offsets(20.0, &DroneDrawConfig::default());
        assert_eq!(offsets[0], vec2(-15.0, -15.0));
        assert_eq!(offsets[3], vec2(15.0, 15.0));
    }
}
