use crate::config::SimConfig;
use crate::coordinates::WorldPoint;
use crate::rng::RandomSource;
use crate::tuning::{
    DELIVERY_VALUE_MIN, DELIVERY_VALUE_SPREAD, OBSTACLE_SIZE_MIN, OBSTACLE_SIZE_SPREAD,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Base {
    pub position: WorldPoint,
    pub size: f32,
}

/// Stable handle for a delivery point; survives deactivation and appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeliveryId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeliveryPoint {
    pub id: DeliveryId,
    pub position: WorldPoint,
    pub active: bool,
    pub size: f32,
    pub value: u32, // displayed only; rewards come from difficulty and level
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Building,
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    pub position: WorldPoint,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

pub fn random_spawn_position(config: &SimConfig, rng: &mut impl RandomSource) -> WorldPoint {
    let (spread_x, spread_y) = config.spawn_extent();
    let x = rng.range(config.spawn_margin, spread_x);
    let y = rng.range(config.spawn_margin, spread_y);
    WorldPoint::new(x, y)
}

pub fn random_delivery_point(
    id: DeliveryId,
    config: &SimConfig,
    rng: &mut impl RandomSource,
) -> DeliveryPoint {
    let position = random_spawn_position(config, rng);
    let value = DELIVERY_VALUE_MIN + (rng.next_unit() * DELIVERY_VALUE_SPREAD as f32).floor() as u32;
    DeliveryPoint {
        id,
        position,
        active: true,
        size: config.delivery_point_size,
        value: value.min(DELIVERY_VALUE_MIN + DELIVERY_VALUE_SPREAD - 1),
    }
}

pub fn random_obstacle(config: &SimConfig, rng: &mut impl RandomSource) -> Obstacle {
    let position = random_spawn_position(config, rng);
    let width = rng.range(OBSTACLE_SIZE_MIN, OBSTACLE_SIZE_SPREAD);
    let height = rng.range(OBSTACLE_SIZE_MIN, OBSTACLE_SIZE_SPREAD);
    let kind = if rng.next_unit() > 0.5 {
        ObstacleKind::Building
    } else {
        ObstacleKind::Tree
    };
    Obstacle {
        position,
        width,
        height,
        kind,
    }
}
