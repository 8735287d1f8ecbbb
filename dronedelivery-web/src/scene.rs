use dronedelivery_core::{
    DeliveryPoint, Obstacle, ObstacleKind, Renderer, WeatherKind, World, WorldPoint,
};
use macroquad::prelude::*;

use crate::canvas::CanvasView;
use crate::drone::{DroneDrawConfig, draw_drone};

const GROUND_HEIGHT: f32 = 50.0;
const ROOF_HEIGHT: f32 = 10.0;
const TRUNK_WIDTH: f32 = 6.0;
const POINT_RING_WIDTH: f32 = 3.0;
const PATH_DASH: f32 = 5.0;
const PATH_WIDTH: f32 = 2.0;
const GRADIENT_BANDS: usize = 32;
const STREAK_DX: f32 = -2.0;
const STREAK_DY: f32 = 10.0;

const GROUND_COLOR: Color = Color::from_rgba(144, 238, 144, 255);
const BASE_COLOR: Color = Color::from_rgba(59, 130, 246, 255);
const BUILDING_COLOR: Color = Color::from_rgba(156, 163, 175, 255);
const ROOF_COLOR: Color = Color::from_rgba(107, 114, 128, 255);
const CANOPY_COLOR: Color = Color::from_rgba(5, 150, 105, 255);
const TRUNK_COLOR: Color = Color::from_rgba(4, 120, 87, 255);
const POINT_COLOR: Color = Color::from_rgba(245, 158, 11, 255);
const POINT_RING_COLOR: Color = Color::from_rgba(217, 119, 6, 255);
const PATH_COLOR: Color = Color::from_rgba(59, 130, 246, 128);
const LETTERBOX_COLOR: Color = Color::from_rgba(17, 24, 39, 255);

/// Top and bottom stops of the sky gradient.
pub fn sky_colors(weather: WeatherKind) -> (Color, Color) {
    match weather {
        WeatherKind::Storm => (
            Color::from_rgba(107, 114, 128, 255),
            Color::from_rgba(156, 163, 175, 255),
        ),
        WeatherKind::Rain => (
            Color::from_rgba(147, 197, 253, 255),
            Color::from_rgba(191, 219, 254, 255),
        ),
        WeatherKind::Clear | WeatherKind::Wind => (
            Color::from_rgba(135, 206, 235, 255),
            Color::from_rgba(176, 224, 230, 255),
        ),
    }
}

/// Streak count and colour, or `None` for dry weather.
pub fn precipitation(weather: WeatherKind) -> Option<(usize, Color)> {
    match weather {
        WeatherKind::Storm => Some((100, Color::from_rgba(200, 200, 255, 153))),
        WeatherKind::Rain => Some((50, Color::from_rgba(100, 100, 200, 77))),
        WeatherKind::Clear | WeatherKind::Wind => None,
    }
}

/// Splits a segment into `on`/`off` dashes, returning the drawn pieces.
pub fn dash_segments(from: Vec2, to: Vec2, on: f32, off: f32) -> Vec<(Vec2, Vec2)> {
    let length = from.distance(to);
    if length <= f32::EPSILON || on <= 0.0 {
        return Vec::new();
    }

    let dir = (to - from) / length;
    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + on).min(length);
        segments.push((from + dir * start, from + dir * end));
        start = end + off;
    }
    segments
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

/// Draws the world canvas into the letterboxed view.
pub struct SceneRenderer {
    pub view: CanvasView,
    drone_config: DroneDrawConfig,
}

impl SceneRenderer {
    pub fn new(view: CanvasView) -> Self {
        Self {
            view,
            drone_config: DroneDrawConfig::default(),
        }
    }

    pub fn set_view(&mut self, view: CanvasView) {
        self.view = view;
    }

    fn fill_canvas_rect(&self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let top_left = self.view.to_screen(WorldPoint::new(x, y));
        draw_rectangle(
            top_left.x,
            top_left.y,
            self.view.length(w),
            self.view.length(h),
            color,
        );
    }

    fn draw_sky(&self, weather: WeatherKind) {
        let (top, bottom) = sky_colors(weather);
        let size = self.view.canvas_size;
        let band = size.y / GRADIENT_BANDS as f32;
        for i in 0..GRADIENT_BANDS {
            let t = (i as f32 + 0.5) / GRADIENT_BANDS as f32;
            // Overlap by a pixel's worth so bands never leave seams.
            let color = lerp_color(top, bottom, t);
            self.fill_canvas_rect(0.0, i as f32 * band, size.x, band + 1.0, color);
        }
        self.fill_canvas_rect(0.0, size.y - GROUND_HEIGHT, size.x, GROUND_HEIGHT, GROUND_COLOR);
    }

    fn draw_base(&self, world: &World) {
        let base = world.base();
        let half = base.size * 0.5;
        self.fill_canvas_rect(
            base.position.x - half,
            base.position.y - half,
            base.size,
            base.size,
            BASE_COLOR,
        );

        let font_size = self.view.length(16.0);
        let label = "BASE";
        let dims = measure_text(label, None, font_size as u16, 1.0);
        let anchor = self.view.to_screen(base.position);
        draw_text(
            label,
            anchor.x - dims.width * 0.5,
            anchor.y + dims.height * 0.5,
            font_size,
            WHITE,
        );
    }

    fn draw_obstacle(&self, obstacle: &Obstacle) {
        let (x, y) = (obstacle.position.x, obstacle.position.y);
        let (w, h) = (obstacle.width, obstacle.height);
        match obstacle.kind {
            ObstacleKind::Building => {
                self.fill_canvas_rect(x - w * 0.5, y - h * 0.5, w, h, BUILDING_COLOR);
                self.fill_canvas_rect(x - w * 0.5, y - h * 0.5, w, ROOF_HEIGHT, ROOF_COLOR);
            }
            ObstacleKind::Tree => {
                let center = self.view.to_screen(obstacle.position);
                draw_circle(center.x, center.y, self.view.length(w * 0.5), CANOPY_COLOR);
                self.fill_canvas_rect(x - TRUNK_WIDTH * 0.5, y, TRUNK_WIDTH, h * 0.5, TRUNK_COLOR);
            }
        }
    }

    fn draw_delivery_point(&self, point: &DeliveryPoint) {
        let center = self.view.to_screen(point.position);
        let radius = self.view.length(point.size);
        draw_circle(center.x, center.y, radius, POINT_COLOR);
        draw_circle_lines(
            center.x,
            center.y,
            radius,
            self.view.length(POINT_RING_WIDTH),
            POINT_RING_COLOR,
        );

        let font_size = self.view.length(12.0);
        let label = format!("${}", point.value);
        let dims = measure_text(&label, None, font_size as u16, 1.0);
        draw_text(
            &label,
            center.x - dims.width * 0.5,
            center.y + dims.height * 0.5,
            font_size,
            WHITE,
        );
    }

    fn draw_delivery_path(&self, world: &World) {
        let drone = world.drone();
        if !drone.is_delivering {
            return;
        }
        let Some(point) = world.active_delivery_point() else {
            return;
        };

        let from = self.view.to_screen(drone.position);
        let to = self.view.to_screen(point.position);
        let dash = self.view.length(PATH_DASH);
        let width = self.view.length(PATH_WIDTH).max(1.0);
        for (start, end) in dash_segments(from, to, dash, dash) {
            draw_line(start.x, start.y, end.x, end.y, width, PATH_COLOR);
        }
    }

    fn draw_precipitation(&self, weather: WeatherKind) {
        let Some((count, color)) = precipitation(weather) else {
            return;
        };
        let size = self.view.canvas_size;
        for _ in 0..count {
            let x = macroquad::rand::gen_range(0.0, size.x);
            let y = macroquad::rand::gen_range(0.0, size.y);
            let start = self.view.to_screen(WorldPoint::new(x, y));
            let end = self.view.to_screen(WorldPoint::new(x + STREAK_DX, y + STREAK_DY));
            draw_line(start.x, start.y, end.x, end.y, 1.0, color);
        }
    }
}

impl Renderer for SceneRenderer {
    fn render(&mut self, world: &World) {
        clear_background(LETTERBOX_COLOR);
        self.draw_sky(world.weather());
        self.draw_base(world);
        for obstacle in world.obstacles() {
            self.draw_obstacle(obstacle);
        }
        for point in world.delivery_points().iter().filter(|point| point.active) {
            self.draw_delivery_point(point);
        }
        draw_drone(world.drone(), &self.view, &self.drone_config);
        self.draw_delivery_path(world);
        self.draw_precipitation(world.weather());
    }
}
