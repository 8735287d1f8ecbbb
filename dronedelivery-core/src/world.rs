use crate::collision;
use crate::config::SimConfig;
use crate::delivery;
use crate::drone::Drone;
use crate::entities::{
    Base, DeliveryId, DeliveryPoint, Obstacle, random_delivery_point, random_obstacle,
};
use crate::events::SimEvent;
use crate::movement::{self, MovementOutcome};
use crate::progression::{self, Upgrades};
use crate::rng::RandomSource;
use crate::tuning::{Difficulty, DifficultySettings, INITIAL_DELIVERY_POINTS, INITIAL_MAX_BATTERY};
use crate::weather::{WeatherKind, roll_weather};

/// The whole simulation state for one run, plus upgrades that outlive runs.
pub struct World {
    pub tick: u64,
    pub(crate) config: SimConfig,
    pub(crate) difficulty: Difficulty,
    pub(crate) score: u32,
    pub(crate) deliveries: u32,
    pub(crate) money: u32,
    pub(crate) level: u32,
    pub(crate) battery: f32,
    pub(crate) max_battery: f32,
    pub(crate) total_attempts: u32,
    pub(crate) upgrades: Upgrades,
    pub(crate) drone: Drone,
    pub(crate) base: Base,
    pub(crate) delivery_points: Vec<DeliveryPoint>,
    pub(crate) active_delivery: Option<DeliveryId>,
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) weather: WeatherKind,
    next_delivery_id: u32,
}

impl World {
    /// An empty world parked at base; call [`World::reset`] to populate a run.
    pub fn new(config: SimConfig) -> Self {
        let base = Base {
            position: config.base_position(),
            size: config.base_size,
        };
        let drone = Drone::docked_at(base.position, config.drone_size, config.drone_speed);
        Self {
            tick: 0,
            difficulty: Difficulty::default(),
            score: 0,
            deliveries: 0,
            money: 0,
            level: 1,
            battery: INITIAL_MAX_BATTERY,
            max_battery: INITIAL_MAX_BATTERY,
            total_attempts: 0,
            upgrades: Upgrades::default(),
            drone,
            base,
            delivery_points: Vec::new(),
            active_delivery: None,
            obstacles: Vec::new(),
            weather: WeatherKind::Clear,
            next_delivery_id: 0,
            config,
        }
    }

    /// Start a fresh run. Upgrades and the upgraded battery capacity carry over.
    pub fn reset(&mut self, difficulty: Difficulty, rng: &mut impl RandomSource) {
        self.tick = 0;
        self.difficulty = difficulty;
        self.score = 0;
        self.deliveries = 0;
        self.money = 0;
        self.level = 1;
        self.battery = self.max_battery;
        self.total_attempts = 0;
        self.drone.dock(self.base.position);
        self.active_delivery = None;
        self.weather = WeatherKind::Clear;

        self.delivery_points.clear();
        for _ in 0..INITIAL_DELIVERY_POINTS {
            self.spawn_delivery_point(rng);
        }

        let obstacle_count = self.settings().obstacle_count;
        self.obstacles.clear();
        for _ in 0..obstacle_count {
            self.obstacles.push(random_obstacle(&self.config, rng));
        }

        tracing::info!(
            %difficulty,
            delivery_points = self.delivery_points.len(),
            obstacles = self.obstacles.len(),
            max_battery = self.max_battery,
            "run initialized"
        );
    }

    /// Advance one frame. `delta` is measured in 60 Hz frames.
    pub fn update(&mut self, delta: f32, rng: &mut impl RandomSource) -> Vec<SimEvent> {
        self.tick += 1;
        let mut events = Vec::new();

        match movement::advance_drone(self, delta) {
            MovementOutcome::BatteryDepleted => {
                events.push(SimEvent::BatteryDepleted);
                return events;
            }
            MovementOutcome::ArrivedAtDelivery => {
                if let Some(outcome) = delivery::complete_delivery(self, rng) {
                    events.push(outcome);
                }
            }
            MovementOutcome::Docked => events.push(SimEvent::Docked {
                battery: self.battery,
            }),
            MovementOutcome::Idle | MovementOutcome::Moving | MovementOutcome::Holding => {}
        }

        events.extend(collision::resolve_collisions(self));

        let chance = self.settings().weather_change_chance;
        if let Some(change) = roll_weather(&mut self.weather, chance, rng) {
            events.push(SimEvent::WeatherChanged(change));
        }

        if let Some(level_up) = progression::check_level_up(self, rng) {
            events.push(level_up);
        }

        events
    }

    pub(crate) fn spawn_delivery_point(&mut self, rng: &mut impl RandomSource) -> DeliveryId {
        let id = DeliveryId(self.next_delivery_id);
        self.next_delivery_id += 1;
        self.delivery_points
            .push(random_delivery_point(id, &self.config, rng));
        id
    }

    pub(crate) fn delivery_point_mut(&mut self, id: DeliveryId) -> Option<&mut DeliveryPoint> {
        self.delivery_points.iter_mut().find(|point| point.id == id)
    }

    pub fn delivery_point(&self, id: DeliveryId) -> Option<&DeliveryPoint> {
        self.delivery_points.iter().find(|point| point.id == id)
    }

    pub fn active_delivery_point(&self) -> Option<&DeliveryPoint> {
        self.active_delivery.and_then(|id| self.delivery_point(id))
    }

    pub fn active_point_count(&self) -> usize {
        self.delivery_points.iter().filter(|point| point.active).count()
    }

    pub fn settings(&self) -> DifficultySettings {
        self.difficulty.settings()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn deliveries(&self) -> u32 {
        self.deliveries
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn battery(&self) -> f32 {
        self.battery
    }

    pub fn max_battery(&self) -> f32 {
        self.max_battery
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn upgrades(&self) -> &Upgrades {
        &self.upgrades
    }

    pub fn drone(&self) -> &Drone {
        &self.drone
    }

    pub fn base(&self) -> &Base {
        &self.base
    }

    pub fn delivery_points(&self) -> &[DeliveryPoint] {
        &self.delivery_points
    }

    pub fn active_delivery(&self) -> Option<DeliveryId> {
        self.active_delivery
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn weather(&self) -> WeatherKind {
        self.weather
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::coordinates::WorldPoint;
    use crate::entities::ObstacleKind;
    use crate::rng::ScriptedRandom;

    /// A reset easy world whose random spawns all land far from the base.
    pub(crate) fn quiet_world() -> World {
        let mut world = World::new(SimConfig::default());
        world.reset(Difficulty::Easy, &mut ScriptedRandom::constant(0.9));
        world
    }

    pub(crate) fn obstacle_at(x: f32, y: f32) -> Obstacle {
        Obstacle {
            position: WorldPoint::new(x, y),
            width: 40.0,
            height: 40.0,
            kind: ObstacleKind::Building,
        }
    }

    #[test]
    fn fresh_easy_run_matches_starting_layout() {
        let mut world = World::new(SimConfig::default());
        world.reset(Difficulty::Easy, &mut ScriptedRandom::constant(0.99));

        assert_eq!(world.delivery_points().len(), 6);
        assert_eq!(world.active_point_count(), 6);
        assert_eq!(world.obstacles().len(), 3);
        assert_eq!(world.battery(), 100.0);
        assert_eq!(world.weather(), WeatherKind::Clear);
        assert!(world.drone().at_base);
        assert_eq!(world.drone().position, world.base().position);
        assert_eq!(
            (world.score(), world.money(), world.deliveries(), world.level()),
            (0, 0, 0, 1)
        );
        assert_eq!(world.active_delivery(), None);
    }

    #[test]
    fn obstacle_count_follows_difficulty() {
        let mut world = World::new(SimConfig::default());
        world.reset(Difficulty::Hard, &mut ScriptedRandom::constant(0.99));
        assert_eq!(world.obstacles().len(), 8);
        world.reset(Difficulty::Medium, &mut ScriptedRandom::constant(0.99));
        assert_eq!(world.obstacles().len(), 5);
    }

    #[test]
    fn delivery_ids_are_unique_across_resets() {
        let mut world = quiet_world();
        let first: Vec<DeliveryId> = world.delivery_points().iter().map(|p| p.id).collect();
        world.reset(Difficulty::Easy, &mut ScriptedRandom::constant(0.99));
        let second: Vec<DeliveryId> = world.delivery_points().iter().map(|p| p.id).collect();
        assert!(first.iter().all(|id| !second.contains(id)));
    }

    #[test]
    fn reset_keeps_upgrades_and_capacity() {
        let mut world = quiet_world();
        world.upgrades.battery = 2;
        world.max_battery = 140.0;
        world.score = 900;
        world.battery = 12.0;

        world.reset(Difficulty::Easy, &mut ScriptedRandom::constant(0.99));
        assert_eq!(world.upgrades().battery, 2);
        assert_eq!(world.max_battery(), 140.0);
        assert_eq!(world.battery(), 140.0);
        assert_eq!(world.score(), 0);
    }

    #[test]
    fn idle_frame_at_base_changes_nothing() {
        let mut world = quiet_world();
        let events = world.update(1.0, &mut ScriptedRandom::constant(0.99));
        assert!(events.is_empty());
        assert_eq!(world.tick, 1);
        assert_eq!(world.battery(), 100.0);
        assert!(world.drone().at_base);
    }
}
