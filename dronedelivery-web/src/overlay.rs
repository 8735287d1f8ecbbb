use dronedelivery_core::{BatteryBand, GameOverReport, HudSnapshot};
use macroquad::prelude::*;

use crate::canvas::CanvasView;

const PANEL_COLOR: Color = Color::from_rgba(0, 0, 0, 140);
const SCRIM_COLOR: Color = Color::from_rgba(0, 0, 0, 170);
const BAR_TRACK_COLOR: Color = Color::from_rgba(55, 65, 81, 255);
const AFFORDABLE_COLOR: Color = Color::from_rgba(134, 239, 172, 255);
const TOO_EXPENSIVE_COLOR: Color = Color::from_rgba(156, 163, 175, 255);

const HUD_FONT: f32 = 18.0;
const LINE_HEIGHT: f32 = 22.0;
const PADDING: f32 = 10.0;
const BAR_WIDTH: f32 = 120.0;
const BAR_HEIGHT: f32 = 12.0;

pub fn battery_color(band: BatteryBand) -> Color {
    match band {
        BatteryBand::Alert => Color::from_rgba(239, 68, 68, 255),
        BatteryBand::Warning => Color::from_rgba(245, 158, 11, 255),
        BatteryBand::Nominal => Color::from_rgba(16, 185, 129, 255),
    }
}

/// Fraction of the bar to fill for a clamped 0..=100 percentage.
pub fn battery_fill(percent: f32) -> f32 {
    (percent / 100.0).clamp(0.0, 1.0)
}

pub fn status_lines(hud: &HudSnapshot, difficulty: &str) -> Vec<String> {
    vec![
        format!("Score: {}", hud.score),
        format!("Deliveries: {}", hud.deliveries),
        format!("Money: {}", hud.money_text()),
        format!("Level: {}", hud.level),
        format!("Weather: {}", hud.weather_text()),
        format!("Difficulty: {difficulty}"),
    ]
}

pub fn shop_lines(hud: &HudSnapshot) -> Vec<(String, bool)> {
    const KEYS: [&str; 3] = ["U", "I", "O"];
    hud.shop
        .iter()
        .zip(KEYS)
        .map(|(row, key)| {
            (
                format!(
                    "[{key}] {} Lv {} - ${}",
                    row.kind.title(),
                    row.level,
                    row.next_cost
                ),
                row.affordable,
            )
        })
        .collect()
}

pub fn report_lines(report: &GameOverReport) -> Vec<String> {
    vec![
        report.reason.clone(),
        format!("Final Score: {}", report.score),
        format!("Deliveries: {}", report.deliveries),
        format!("Money Earned: ${}", report.money),
        format!("Success Rate: {}%", report.success_rate),
        format!("Level Reached: {}", report.level),
    ]
}

fn draw_centered(text: &str, center_x: f32, baseline: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, center_x - dims.width * 0.5, baseline, font_size, color);
}

pub fn draw_hud(hud: &HudSnapshot, difficulty: &str, view: &CanvasView) {
    let lines = status_lines(hud, difficulty);
    let shop = shop_lines(hud);
    let origin = view.offset + vec2(PADDING, PADDING);
    let rows = lines.len() + shop.len() + 1;
    draw_rectangle(
        origin.x - PADDING * 0.5,
        origin.y - PADDING * 0.5,
        280.0,
        rows as f32 * LINE_HEIGHT + PADDING,
        PANEL_COLOR,
    );

    let mut baseline = origin.y + HUD_FONT;
    for line in &lines {
        draw_text(line, origin.x, baseline, HUD_FONT, WHITE);
        baseline += LINE_HEIGHT;
    }

    let label = format!("Battery: {}", hud.battery_text());
    draw_text(&label, origin.x, baseline, HUD_FONT, WHITE);
    let bar_x = origin.x + 140.0;
    let bar_y = baseline - BAR_HEIGHT;
    draw_rectangle(bar_x, bar_y, BAR_WIDTH, BAR_HEIGHT, BAR_TRACK_COLOR);
    draw_rectangle(
        bar_x,
        bar_y,
        BAR_WIDTH * battery_fill(hud.battery_percent),
        BAR_HEIGHT,
        battery_color(hud.battery_band),
    );
    baseline += LINE_HEIGHT;

    for (line, affordable) in &shop {
        let color = if *affordable { AFFORDABLE_COLOR } else { TOO_EXPENSIVE_COLOR };
        draw_text(line, origin.x, baseline, HUD_FONT, color);
        baseline += LINE_HEIGHT;
    }
}

pub fn draw_notice(text: &str, view: &CanvasView) {
    let size = view.canvas_size * view.scale;
    let center_x = view.offset.x + size.x * 0.5;
    let top = view.offset.y + size.y * 0.15;
    let dims = measure_text(text, None, 24, 1.0);
    draw_rectangle(
        center_x - dims.width * 0.5 - PADDING,
        top - PADDING,
        dims.width + PADDING * 2.0,
        dims.height + PADDING * 2.0,
        PANEL_COLOR,
    );
    draw_centered(text, center_x, top + dims.height, 24.0, WHITE);
}

pub fn draw_banner(title: &str, subtitle: &str, view: &CanvasView) {
    let size = view.canvas_size * view.scale;
    draw_rectangle(view.offset.x, view.offset.y, size.x, size.y, SCRIM_COLOR);
    let center = view.offset + size * 0.5;
    draw_centered(title, center.x, center.y, 40.0, WHITE);
    draw_centered(subtitle, center.x, center.y + 32.0, 20.0, LIGHTGRAY);
}

pub fn draw_game_over(report: &GameOverReport, view: &CanvasView) {
    let size = view.canvas_size * view.scale;
    draw_rectangle(view.offset.x, view.offset.y, size.x, size.y, SCRIM_COLOR);

    let center_x = view.offset.x + size.x * 0.5;
    let mut baseline = view.offset.y + size.y * 0.3;
    draw_centered("Game Over", center_x, baseline, 44.0, WHITE);
    baseline += 40.0;
    for line in report_lines(report) {
        draw_centered(&line, center_x, baseline, 22.0, WHITE);
        baseline += 28.0;
    }
    draw_centered("Press R to play again", center_x, baseline + 12.0, 20.0, LIGHTGRAY);
}
