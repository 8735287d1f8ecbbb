use crate::adapter::Renderer;
use crate::clock::FrameClock;
use crate::config::SimConfig;
use crate::coordinates::WorldPoint;
use crate::delivery::{self, DispatchError, DispatchErrorReason};
use crate::events::SimEvent;
use crate::hud::HudSnapshot;
use crate::notice::NoticeBoard;
use crate::progression::{self, PurchaseError, UpgradeKind};
use crate::report::{BATTERY_DEPLETED, GameOverReport};
use crate::rng::RandomSource;
use crate::tuning::Difficulty;
use crate::world::World;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Not running, or paused: nothing was updated or drawn.
    Skipped,
    Advanced(Vec<SimEvent>),
    GameOver(GameOverReport),
}

/// One play session: the world plus the commands a host UI can issue.
pub struct Game<R: RandomSource> {
    world: World,
    rng: R,
    clock: FrameClock,
    running: bool,
    paused: bool,
    difficulty: Difficulty,
    notices: NoticeBoard,
    game_over: Option<GameOverReport>,
}

impl<R: RandomSource> Game<R> {
    pub fn new(config: SimConfig, rng: R) -> Self {
        Self {
            world: World::new(config),
            rng,
            clock: FrameClock::new(),
            running: false,
            paused: false,
            difficulty: Difficulty::default(),
            notices: NoticeBoard::new(),
            game_over: None,
        }
    }

    /// Begin a run. Returns false (and changes nothing) if one is already going.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.running {
            return false;
        }

        self.world.reset(self.difficulty, &mut self.rng);
        self.game_over = None;
        self.running = true;
        self.paused = false;
        self.clock.start(now_ms);
        true
    }

    /// Returns the new paused state, or `None` when no run is active.
    pub fn toggle_pause(&mut self, now_ms: f64) -> Option<bool> {
        if !self.running {
            return None;
        }

        self.paused = !self.paused;
        if self.paused {
            self.clock.stop();
        } else {
            self.clock.start(now_ms);
        }
        tracing::debug!(paused = self.paused, "pause toggled");
        Some(self.paused)
    }

    pub fn return_to_base(&mut self) -> Option<SimEvent> {
        if !self.running {
            return None;
        }
        delivery::recall(&mut self.world)
    }

    /// Dismiss the game-over report and start again.
    pub fn restart(&mut self, now_ms: f64) -> bool {
        self.game_over = None;
        self.start(now_ms)
    }

    /// Takes effect on the next start.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn buy_upgrade(
        &mut self,
        kind: UpgradeKind,
        now_ms: f64,
    ) -> Result<SimEvent, PurchaseError> {
        match progression::purchase_upgrade(&mut self.world, kind) {
            Ok(event) => {
                if let Some(text) = event.notice_text() {
                    self.notices.post(text, now_ms);
                }
                Ok(event)
            }
            Err(err) => {
                self.notices.post(err.message(), now_ms);
                Err(err)
            }
        }
    }

    /// Pointer click in canvas coordinates.
    pub fn click(&mut self, at: WorldPoint) -> Result<SimEvent, DispatchError> {
        if !self.running {
            return Err(DispatchError::new(DispatchErrorReason::NotRunning));
        }
        if self.paused {
            return Err(DispatchError::new(DispatchErrorReason::Paused));
        }
        if !self.world.drone().at_base {
            return Err(DispatchError::new(DispatchErrorReason::NotAtBase));
        }

        let id = delivery::pick_delivery_point(self.world.delivery_points(), at)
            .ok_or(DispatchError::new(DispatchErrorReason::NoPointSelected))?;
        delivery::dispatch(&mut self.world, id)
    }

    /// Update then render one frame, if the loop is scheduled.
    pub fn frame(&mut self, now_ms: f64, renderer: &mut impl Renderer) -> FrameOutcome {
        if !self.running || self.paused {
            return FrameOutcome::Skipped;
        }
        let Some(delta) = self.clock.tick(now_ms) else {
            return FrameOutcome::Skipped;
        };

        let events = self.world.update(delta, &mut self.rng);
        for event in &events {
            if let Some(text) = event.notice_text() {
                self.notices.post(text, now_ms);
            }
        }
        renderer.render(&self.world);

        if events.contains(&SimEvent::BatteryDepleted) {
            return FrameOutcome::GameOver(self.finish(BATTERY_DEPLETED));
        }
        FrameOutcome::Advanced(events)
    }

    fn finish(&mut self, reason: &str) -> GameOverReport {
        self.running = false;
        self.paused = false;
        self.clock.stop();

        let report = GameOverReport::from_world(&self.world, reason);
        tracing::info!(
            reason,
            score = report.score,
            deliveries = report.deliveries,
            success_rate = report.success_rate,
            level = report.level,
            "game over"
        );
        self.game_over = Some(report.clone());
        report
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_world(&self.world)
    }

    pub fn notice(&self, now_ms: f64) -> Option<&str> {
        self.notices.current(now_ms)
    }

    pub fn game_over(&self) -> Option<&GameOverReport> {
        self.game_over.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_scheduled(&self) -> bool {
        self.clock.is_scheduled()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}
