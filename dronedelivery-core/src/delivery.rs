use crate::coordinates::WorldPoint;
use crate::entities::{DeliveryId, DeliveryPoint};
use crate::events::SimEvent;
use crate::rng::RandomSource;
use crate::tuning::{
    PICK_RADIUS_PADDING, REPLENISH_BELOW_ACTIVE, SCORE_PENALTY, WEATHER_RESISTANCE_PER_LEVEL,
};
use crate::weather::WeatherKind;
use crate::world::World;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchErrorReason {
    NotRunning,
    Paused,
    NotAtBase,
    NoPointSelected,
    UnknownPoint,
    PointInactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchError {
    pub reason: DispatchErrorReason,
}

impl DispatchError {
    pub fn new(reason: DispatchErrorReason) -> Self {
        Self { reason }
    }

    pub fn message(&self) -> &'static str {
        match self.reason {
            DispatchErrorReason::NotRunning => "game is not running",
            DispatchErrorReason::Paused => "game is paused",
            DispatchErrorReason::NotAtBase => "drone must be at base to dispatch",
            DispatchErrorReason::NoPointSelected => "no delivery point under the pointer",
            DispatchErrorReason::UnknownPoint => "delivery point does not exist",
            DispatchErrorReason::PointInactive => "delivery point was already served",
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for DispatchError {}

/// First active point in insertion order whose pick radius contains `at`.
pub fn pick_delivery_point(points: &[DeliveryPoint], at: WorldPoint) -> Option<DeliveryId> {
    points
        .iter()
        .filter(|point| point.active)
        .find(|point| point.position.distance(at) < point.size + PICK_RADIUS_PADDING)
        .map(|point| point.id)
}

pub fn success_probability(weather: WeatherKind, weather_level: u32) -> f32 {
    let resistance = 1.0 + weather_level as f32 * WEATHER_RESISTANCE_PER_LEVEL;
    (weather.success_modifier() * resistance).min(1.0)
}

/// `AtBase -> EnRoute`. Run-state checks belong to the caller.
pub fn dispatch(world: &mut World, id: DeliveryId) -> Result<SimEvent, DispatchError> {
    if !world.drone.at_base {
        return Err(DispatchError::new(DispatchErrorReason::NotAtBase));
    }
    let point = world
        .delivery_point(id)
        .copied()
        .ok_or(DispatchError::new(DispatchErrorReason::UnknownPoint))?;
    if !point.active {
        return Err(DispatchError::new(DispatchErrorReason::PointInactive));
    }

    world.drone.head_to(point.position, true);
    world.active_delivery = Some(id);
    world.total_attempts += 1;
    tracing::debug!(
        delivery = id.0,
        x = point.position.x,
        y = point.position.y,
        attempts = world.total_attempts,
        "drone dispatched"
    );
    Ok(SimEvent::Dispatched { delivery: id })
}

/// `Completing -> AtBase`: roll for success, settle the reward or penalty,
/// then point the drone home.
pub fn complete_delivery(world: &mut World, rng: &mut impl RandomSource) -> Option<SimEvent> {
    let id = world.active_delivery?;
    let probability = success_probability(world.weather, world.upgrades.weather);

    let outcome = if rng.chance(probability) {
        let reward = world.settings().delivery_reward * world.level;
        world.score += reward;
        world.money += reward;
        world.deliveries += 1;

        if let Some(point) = world.delivery_point_mut(id) {
            point.active = false;
        }
        if world.active_point_count() < REPLENISH_BELOW_ACTIVE {
            let fresh = world.spawn_delivery_point(rng);
            tracing::debug!(delivery = fresh.0, "delivery point replenished");
        }

        tracing::info!(
            delivery = id.0,
            reward,
            deliveries = world.deliveries,
            "delivery succeeded"
        );
        SimEvent::DeliverySucceeded {
            delivery: id,
            reward,
        }
    } else {
        world.score = world.score.saturating_sub(SCORE_PENALTY);
        tracing::info!(
            delivery = id.0,
            weather = ?world.weather,
            probability,
            "delivery failed"
        );
        SimEvent::DeliveryFailed { delivery: id }
    };

    world.drone.target = world.base.position;
    world.drone.is_delivering = false;
    world.active_delivery = None;
    Some(outcome)
}

/// Manual return. The abandoned point stays active and selectable.
/// Returns `None` when the drone is already parked.
pub fn recall(world: &mut World) -> Option<SimEvent> {
    if world.drone.at_base {
        return None;
    }

    let abandoned = world.active_delivery.take();
    world.drone.target = world.base.position;
    world.drone.is_delivering = false;
    tracing::debug!(abandoned = ?abandoned.map(|id| id.0), "drone recalled");
    Some(SimEvent::Recalled {
        delivery: abandoned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use crate::world::tests::quiet_world;

    fn in_flight(world: &mut World, index: usize) -> DeliveryId {
        let id = world.delivery_points[index].id;
        dispatch(world, id).unwrap();
        world.drone.position = world.delivery_points[index].position;
        id
    }

    #[test]
    fn picks_first_point_in_insertion_order() {
        let mut world = quiet_world();
        world.delivery_points[1].position = WorldPoint::new(300.0, 300.0);
        world.delivery_points[4].position = WorldPoint::new(305.0, 300.0);

        let pick = pick_delivery_point(&world.delivery_points, WorldPoint::new(303.0, 300.0));
        assert_eq!(pick, Some(world.delivery_points[1].id));

        world.delivery_points[1].active = false;
        let pick = pick_delivery_point(&world.delivery_points, WorldPoint::new(303.0, 300.0));
        assert_eq!(pick, Some(world.delivery_points[4].id));
    }

    #[test]
    fn pick_radius_is_size_plus_padding() {
        let mut world = quiet_world();
        world.delivery_points.truncate(1);
        world.delivery_points[0].position = WorldPoint::new(300.0, 300.0);
        let points = &world.delivery_points;
        assert!(pick_delivery_point(points, WorldPoint::new(324.9, 300.0)).is_some());
        assert!(pick_delivery_point(points, WorldPoint::new(325.0, 300.0)).is_none());
    }

    #[test]
    fn weather_resistance_boosts_and_caps_probability() {
        assert_eq!(success_probability(WeatherKind::Storm, 0), 0.6);
        assert!((success_probability(WeatherKind::Storm, 4) - 0.84).abs() < 1e-6);
        assert_eq!(success_probability(WeatherKind::Rain, 3), 1.0);
        assert_eq!(success_probability(WeatherKind::Clear, 0), 1.0);
    }

    #[test]
    fn dispatch_launches_toward_point() {
        let mut world = quiet_world();
        let id = world.delivery_points[2].id;
        let event = dispatch(&mut world, id).unwrap();

        assert_eq!(event, SimEvent::Dispatched { delivery: id });
        assert!(world.drone.is_delivering);
        assert!(!world.drone.at_base);
        assert_eq!(world.drone.target, world.delivery_points[2].position);
        assert_eq!(world.active_delivery, Some(id));
        assert_eq!(world.total_attempts, 1);

        let other = world.delivery_points[3].id;
        let second = dispatch(&mut world, other).unwrap_err();
        assert_eq!(second.reason, DispatchErrorReason::NotAtBase);
        assert_eq!(world.total_attempts, 1);
    }

    #[test]
    fn dispatch_rejects_inactive_and_unknown_points() {
        let mut world = quiet_world();
        world.delivery_points[0].active = false;
        let id = world.delivery_points[0].id;
        assert_eq!(
            dispatch(&mut world, id).unwrap_err().reason,
            DispatchErrorReason::PointInactive
        );
        assert_eq!(
            dispatch(&mut world, DeliveryId(999)).unwrap_err().reason,
            DispatchErrorReason::UnknownPoint
        );
        assert!(world.drone.at_base);
    }

    #[test]
    fn easy_level_one_success_pays_one_hundred() {
        let mut world = quiet_world();
        let id = in_flight(&mut world, 0);
        let event = complete_delivery(&mut world, &mut ScriptedRandom::new([0.5])).unwrap();

        assert_eq!(event, SimEvent::DeliverySucceeded { delivery: id, reward: 100 });
        assert_eq!(world.score, 100);
        assert_eq!(world.money, 100);
        assert_eq!(world.deliveries, 1);
        assert!(!world.delivery_points[0].active);
        assert_eq!(world.drone.target, world.base.position);
        assert!(!world.drone.is_delivering);
        assert!(!world.drone.at_base);
        assert_eq!(world.active_delivery, None);
        // Five points remain active, so nothing is appended.
        assert_eq!(world.delivery_points.len(), 6);
    }

    #[test]
    fn reward_scales_with_level_and_difficulty() {
        let mut world = quiet_world();
        world.difficulty = crate::tuning::Difficulty::Hard;
        world.level = 3;
        in_flight(&mut world, 0);
        complete_delivery(&mut world, &mut ScriptedRandom::new([0.0]));
        assert_eq!(world.score, 600);
        assert_eq!(world.money, 600);
    }

    #[test]
    fn failed_roll_penalizes_without_reward() {
        let mut world = quiet_world();
        world.weather = WeatherKind::Storm;
        world.score = 30;
        let id = in_flight(&mut world, 1);
        let event = complete_delivery(&mut world, &mut ScriptedRandom::new([0.6])).unwrap();

        assert_eq!(event, SimEvent::DeliveryFailed { delivery: id });
        assert_eq!(world.score, 0);
        assert_eq!(world.money, 0);
        assert_eq!(world.deliveries, 0);
        assert!(world.delivery_points[1].active);
        assert_eq!(world.drone.target, world.base.position);
        assert_eq!(world.active_delivery, None);
    }

    #[test]
    fn replenishes_one_point_when_fewer_than_three_remain() {
        let mut world = quiet_world();
        for point in world.delivery_points.iter_mut().skip(3) {
            point.active = false;
        }
        assert_eq!(world.active_point_count(), 3);

        in_flight(&mut world, 0);
        complete_delivery(&mut world, &mut ScriptedRandom::new([0.1, 0.5, 0.5, 0.5]));

        assert_eq!(world.delivery_points.len(), 7);
        assert_eq!(world.active_point_count(), 3);
        let fresh = world.delivery_points.last().unwrap();
        assert!(fresh.active);
        assert_eq!(fresh.position, WorldPoint::new(400.0, 250.0));
        assert_eq!(fresh.value, 100);
    }

    #[test]
    fn recall_abandons_without_penalty() {
        let mut world = quiet_world();
        world.score = 200;
        let id = world.delivery_points[0].id;
        dispatch(&mut world, id).unwrap();
        world.drone.position = WorldPoint::new(150.0, 150.0);

        assert_eq!(recall(&mut world), Some(SimEvent::Recalled { delivery: Some(id) }));
        assert_eq!(world.score, 200);
        assert!(!world.drone.is_delivering);
        assert_eq!(world.drone.target, world.base.position);
        assert_eq!(world.active_delivery, None);
        assert!(world.delivery_points[0].active);
        assert_eq!(world.total_attempts, 1);
    }

    #[test]
    fn recall_at_base_is_ignored() {
        let mut world = quiet_world();
        assert_eq!(recall(&mut world), None);
    }
}
