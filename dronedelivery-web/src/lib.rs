use dronedelivery_core::{
    BatteryBand, Difficulty, FastRandSource, FrameOutcome, Game, HudSnapshot, Renderer, ShopRow,
    SimConfig, UpgradeKind, WeatherKind,
};
#[cfg(target_arch = "wasm32")]
use macroquad::miniquad;
use macroquad::prelude::*;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::canvas::CanvasView;
use crate::scene::SceneRenderer;

mod canvas;
mod drone;
mod overlay;
mod scene;

#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "DRONE_DELIVERY_CONFIG";
const NO_SELECTION: i32 = -1;

static PENDING_START: AtomicBool = AtomicBool::new(false);
static PENDING_PAUSE: AtomicBool = AtomicBool::new(false);
static PENDING_RETURN: AtomicBool = AtomicBool::new(false);
static PENDING_RESTART: AtomicBool = AtomicBool::new(false);
static PENDING_DIFFICULTY: AtomicI32 = AtomicI32::new(NO_SELECTION);
// One bit per upgrade kind so several clicks in a frame all land.
static PENDING_UPGRADES: AtomicU32 = AtomicU32::new(0);

#[derive(Default)]
struct HudMirror {
    running: bool,
    paused: bool,
    hud: Option<HudSnapshot>,
    notice: String,
    game_over_visible: bool,
    game_over_reason: String,
    game_over_score: u32,
    game_over_deliveries: u32,
    game_over_money: u32,
    game_over_success_rate: u32,
    game_over_level: u32,
}

fn hud_mirror() -> MutexGuard<'static, HudMirror> {
    static HUD_MIRROR: OnceLock<Mutex<HudMirror>> = OnceLock::new();
    HUD_MIRROR
        .get_or_init(|| Mutex::new(HudMirror::default()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[unsafe(no_mangle)]
pub extern "C" fn start_game() {
    PENDING_START.store(true, Ordering::SeqCst);
}

#[unsafe(no_mangle)]
pub extern "C" fn toggle_pause() {
    PENDING_PAUSE.store(true, Ordering::SeqCst);
}

#[unsafe(no_mangle)]
pub extern "C" fn return_to_base() {
    PENDING_RETURN.store(true, Ordering::SeqCst);
}

#[unsafe(no_mangle)]
pub extern "C" fn restart_game() {
    PENDING_RESTART.store(true, Ordering::SeqCst);
}

/// 0 easy, 1 medium, 2 hard.
#[unsafe(no_mangle)]
pub extern "C" fn select_difficulty(code: i32) {
    if difficulty_from_code(code).is_some() {
        PENDING_DIFFICULTY.store(code, Ordering::SeqCst);
    }
}

/// 0 battery, 1 speed, 2 weather resistance.
#[unsafe(no_mangle)]
pub extern "C" fn buy_upgrade(code: i32) {
    if upgrade_from_code(code).is_some() {
        PENDING_UPGRADES.fetch_or(1 << code, Ordering::SeqCst);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn game_running() -> i32 {
    if hud_mirror().running { 1 } else { 0 }
}

#[unsafe(no_mangle)]
pub extern "C" fn game_paused() -> i32 {
    if hud_mirror().paused { 1 } else { 0 }
}

#[unsafe(no_mangle)]
pub extern "C" fn hud_score() -> u32 {
    hud_mirror().hud.as_ref().map_or(0, |hud| hud.score)
}

#[unsafe(no_mangle)]
pub extern "C" fn hud_deliveries() -> u32 {
    hud_mirror().hud.as_ref().map_or(0, |hud| hud.deliveries)
}

#[unsafe(no_mangle)]
pub extern "C" fn hud_money() -> u32 {
    hud_mirror().hud.as_ref().map_or(0, |hud| hud.money)
}

#[unsafe(no_mangle)]
pub extern "C" fn hud_level() -> u32 {
    hud_mirror().hud.as_ref().map_or(1, |hud| hud.level)
}

#[unsafe(no_mangle)]
pub extern "C" fn hud_battery_percent() -> f32 {
    hud_mirror().hud.as_ref().map_or(100.0, |hud| hud.battery_percent)
}

/// 0 alert, 1 warning, 2 nominal.
#[unsafe(no_mangle)]
pub extern "C" fn hud_battery_band() -> i32 {
    match hud_mirror().hud.as_ref().map(|hud| hud.battery_band) {
        Some(BatteryBand::Alert) => 0,
        Some(BatteryBand::Warning) => 1,
        Some(BatteryBand::Nominal) | None => 2,
    }
}

/// 0 clear, 1 rain, 2 wind, 3 storm.
#[unsafe(no_mangle)]
pub extern "C" fn hud_weather() -> i32 {
    match hud_mirror().hud.as_ref().map(|hud| hud.weather) {
        Some(WeatherKind::Clear) | None => 0,
        Some(WeatherKind::Rain) => 1,
        Some(WeatherKind::Wind) => 2,
        Some(WeatherKind::Storm) => 3,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn upgrade_level(code: i32) -> u32 {
    shop_value(code, |row| row.level)
}

#[unsafe(no_mangle)]
pub extern "C" fn upgrade_cost(code: i32) -> u32 {
    shop_value(code, |row| row.next_cost)
}

fn shop_value(code: i32, read: impl Fn(&ShopRow) -> u32) -> u32 {
    let Some(kind) = upgrade_from_code(code) else {
        return 0;
    };
    let mirror = hud_mirror();
    mirror
        .hud
        .as_ref()
        .and_then(|hud| hud.shop.iter().find(|row| row.kind == kind))
        .map_or(0, read)
}

#[unsafe(no_mangle)]
pub extern "C" fn notice_text_ptr() -> *const u8 {
    let mirror = hud_mirror();
    if mirror.notice.is_empty() {
        ptr::null()
    } else {
        mirror.notice.as_ptr()
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn notice_text_len() -> usize {
    hud_mirror().notice.len()
}

#[unsafe(no_mangle)]
pub extern "C" fn game_over_visible() -> i32 {
    if hud_mirror().game_over_visible { 1 } else { 0 }
}

#[unsafe(no_mangle)]
pub extern "C" fn game_over_reason_ptr() -> *const u8 {
    let mirror = hud_mirror();
    if mirror.game_over_visible {
        mirror.game_over_reason.as_ptr()
    } else {
        ptr::null()
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn game_over_reason_len() -> usize {
    let mirror = hud_mirror();
    if mirror.game_over_visible { mirror.game_over_reason.len() } else { 0 }
}

#[unsafe(no_mangle)]
pub extern "C" fn game_over_score() -> u32 {
    hud_mirror().game_over_score
}

#[unsafe(no_mangle)]
pub extern "C" fn game_over_deliveries() -> u32 {
    hud_mirror().game_over_deliveries
}

#[unsafe(no_mangle)]
pub extern "C" fn game_over_money() -> u32 {
    hud_mirror().game_over_money
}

#[unsafe(no_mangle)]
pub extern "C" fn game_over_success_rate() -> u32 {
    hud_mirror().game_over_success_rate
}

#[unsafe(no_mangle)]
pub extern "C" fn game_over_level() -> u32 {
    hud_mirror().game_over_level
}

fn difficulty_from_code(code: i32) -> Option<Difficulty> {
    usize::try_from(code)
        .ok()
        .and_then(|index| Difficulty::ALL.get(index).copied())
}

fn upgrade_from_code(code: i32) -> Option<UpgradeKind> {
    usize::try_from(code)
        .ok()
        .and_then(|index| UpgradeKind::ALL.get(index).copied())
}

fn take_pending_upgrades() -> Vec<UpgradeKind> {
    let bits = PENDING_UPGRADES.swap(0, Ordering::SeqCst);
    UpgradeKind::ALL
        .into_iter()
        .enumerate()
        .filter(|(index, _)| bits & (1 << index) != 0)
        .map(|(_, kind)| kind)
        .collect()
}

fn take_pending_difficulty() -> Option<Difficulty> {
    difficulty_from_code(PENDING_DIFFICULTY.swap(NO_SELECTION, Ordering::SeqCst))
}

fn log_ui_action(label: &str) {
    #[cfg(target_arch = "wasm32")]
    miniquad::info!("{}", label);
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!("{label}");
}

/// Key bindings mirroring the exported host commands.
fn queue_keyboard_commands() {
    if is_key_pressed(KeyCode::Enter) {
        start_game();
    }
    if is_key_pressed(KeyCode::P) {
        toggle_pause();
    }
    if is_key_pressed(KeyCode::B) {
        return_to_base();
    }
    if is_key_pressed(KeyCode::R) {
        restart_game();
    }
    for (key, code) in [(KeyCode::Key1, 0), (KeyCode::Key2, 1), (KeyCode::Key3, 2)] {
        if is_key_pressed(key) {
            select_difficulty(code);
        }
    }
    for (key, code) in [(KeyCode::U, 0), (KeyCode::I, 1), (KeyCode::O, 2)] {
        if is_key_pressed(key) {
            buy_upgrade(code);
        }
    }
}

struct GameState {
    game: Game<FastRandSource>,
    scene: SceneRenderer,
}

impl GameState {
    fn new(config: SimConfig, seed: u64) -> Self {
        let view = CanvasView::fit(screen_width(), screen_height(), &config);
        Self {
            game: Game::new(config, FastRandSource::with_seed(seed)),
            scene: SceneRenderer::new(view),
        }
    }

    fn apply_pending_commands(&mut self, now_ms: f64) {
        if let Some(difficulty) = take_pending_difficulty() {
            self.game.set_difficulty(difficulty);
            log_ui_action(&format!("difficulty: {difficulty}"));
        }

        if PENDING_RESTART.swap(false, Ordering::SeqCst) && self.game.restart(now_ms) {
            log_ui_action("restart");
        }
        if PENDING_START.swap(false, Ordering::SeqCst) && self.game.start(now_ms) {
            log_ui_action(&format!("start: {}", self.game.difficulty()));
        }
        if PENDING_PAUSE.swap(false, Ordering::SeqCst) {
            if let Some(paused) = self.game.toggle_pause(now_ms) {
                log_ui_action(if paused { "pause" } else { "resume" });
            }
        }
        if PENDING_RETURN.swap(false, Ordering::SeqCst) && self.game.return_to_base().is_some() {
            log_ui_action("return to base");
        }

        for kind in take_pending_upgrades() {
            match self.game.buy_upgrade(kind, now_ms) {
                Ok(_) => log_ui_action(&format!("upgrade: {}", kind.title())),
                Err(err) => log_ui_action(&format!("upgrade refused: {err}")),
            }
        }
    }

    fn handle_left_click(&mut self) {
        if !is_mouse_button_pressed(MouseButton::Left) {
            return;
        }

        let (mouse_x, mouse_y) = mouse_position();
        let Some(at) = self.scene.view.to_canvas(vec2(mouse_x, mouse_y)) else {
            return;
        };
        match self.game.click(at) {
            Ok(_) => log_ui_action(&format!("dispatch to ({:.0}, {:.0})", at.x, at.y)),
            Err(err) => tracing::debug!(reason = %err, "click ignored"),
        }
    }

    fn frame(&mut self, now_ms: f64) {
        let view = CanvasView::fit(screen_width(), screen_height(), self.game.world().config());
        self.scene.set_view(view);

        match self.game.frame(now_ms, &mut self.scene) {
            FrameOutcome::Advanced(_) => {}
            FrameOutcome::GameOver(report) => {
                log_ui_action(&format!("game over: {}", report.to_json()));
            }
            // Frozen world still needs to be on screen.
            FrameOutcome::Skipped => self.scene.render(self.game.world()),
        }
    }

    fn render_overlay(&self, now_ms: f64) {
        let view = &self.scene.view;
        let hud = self.game.hud();
        overlay::draw_hud(&hud, self.game.difficulty().name(), view);

        if let Some(report) = self.game.game_over() {
            overlay::draw_game_over(report, view);
        } else if !self.game.is_running() {
            overlay::draw_banner(
                "Drone Delivery",
                "Enter to start, 1/2/3 difficulty, click a package to deliver",
                view,
            );
        } else if self.game.is_paused() {
            overlay::draw_banner("Paused", "Press P to resume", view);
        }

        if let Some(text) = self.game.notice(now_ms) {
            overlay::draw_notice(text, view);
        }
    }

    fn sync_hud_mirror(&self, now_ms: f64) {
        let mut mirror = hud_mirror();
        mirror.running = self.game.is_running();
        mirror.paused = self.game.is_paused();
        mirror.hud = Some(self.game.hud());
        mirror.notice.clear();
        if let Some(text) = self.game.notice(now_ms) {
            mirror.notice.push_str(text);
        }

        mirror.game_over_reason.clear();
        match self.game.game_over() {
            Some(report) => {
                mirror.game_over_visible = true;
                mirror.game_over_reason.push_str(&report.reason);
                mirror.game_over_score = report.score;
                mirror.game_over_deliveries = report.deliveries;
                mirror.game_over_money = report.money;
                mirror.game_over_success_rate = report.success_rate;
                mirror.game_over_level = report.level;
            }
            None => mirror.game_over_visible = false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> SimConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return SimConfig::default();
    };

    let loaded = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|text| SimConfig::from_json(&text).map_err(|err| err.to_string()));
    match loaded {
        Ok(config) => {
            tracing::info!(%path, "loaded config");
            config
        }
        Err(err) => {
            tracing::warn!(%path, error = %err, "falling back to default config");
            SimConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> SimConfig {
    SimConfig::default()
}

fn clock_seed() -> u64 {
    (macroquad::miniquad::date::now() * 1000.0) as u64
}

/// Native logging setup; the browser build logs through miniquad instead.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run() {
    install_panic_hook();
    let seed = clock_seed();
    macroquad::rand::srand(seed);
    let mut state = GameState::new(load_config(), seed);

    loop {
        let now_ms = get_time() * 1000.0;
        queue_keyboard_commands();
        state.apply_pending_commands(now_ms);
        state.handle_left_click();
        state.frame(now_ms);
        state.render_overlay(now_ms);
        state.sync_hud_mirror(now_ms);

        next_frame().await;
    }
}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_codes_decode_in_display_order() {
        assert_eq!(difficulty_from_code(0), Some(Difficulty::Easy));
        assert_eq!(difficulty_from_code(2), Some(Difficulty::Hard));
        assert_eq!(difficulty_from_code(3), None);
        assert_eq!(difficulty_from_code(-1), None);

        assert_eq!(upgrade_from_code(1), Some(UpgradeKind::Speed));
        assert_eq!(upgrade_from_code(7), None);
    }

    #[test]
    fn queued_upgrades_drain_once() {
        buy_upgrade(2);
        buy_upgrade(0);
        buy_upgrade(9);
        assert_eq!(
            take_pending_upgrades(),
            vec![UpgradeKind::Battery, UpgradeKind::Weather]
        );
        assert!(take_pending_upgrades().is_empty());
    }

    #[test]
    fn difficulty_selection_keeps_the_latest_valid_code() {
        select_difficulty(1);
        select_difficulty(5);
        assert_eq!(take_pending_difficulty(), Some(Difficulty::Medium));
        assert_eq!(take_pending_difficulty(), None);
    }
}
