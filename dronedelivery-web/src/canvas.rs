use dronedelivery_core::{SimConfig, WorldPoint};
use macroquad::prelude::{Vec2, vec2};

/// Maps the fixed-size world canvas onto the window, letterboxed and centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    pub scale: f32,
    pub offset: Vec2,
    pub canvas_size: Vec2,
}

impl CanvasView {
    pub fn fit(screen_width: f32, screen_height: f32, config: &SimConfig) -> Self {
        let canvas_size = vec2(config.canvas_width, config.canvas_height);
        let scale = (screen_width / canvas_size.x)
            .min(screen_height / canvas_size.y)
            .max(f32::EPSILON);
        let offset = vec2(
            (screen_width - canvas_size.x * scale) * 0.5,
            (screen_height - canvas_size.y * scale) * 0.5,
        );
        Self {
            scale,
            offset,
            canvas_size,
        }
    }

    pub fn to_screen(&self, point: WorldPoint) -> Vec2 {
        self.offset + vec2(point.x, point.y) * self.scale
    }

    pub fn length(&self, world_units: f32) -> f32 {
        world_units * self.scale
    }

    /// Screen position back to canvas space; `None` outside the canvas.
    pub fn to_canvas(&self, screen: Vec2) -> Option<WorldPoint> {
        let local = (screen - self.offset) / self.scale;
        let inside = (0.0..=self.canvas_size.x).contains(&local.x)
            && (0.0..=self.canvas_size.y).contains(&local.y);
        inside.then(|| WorldPoint::new(local.x, local.y))
    }
}
