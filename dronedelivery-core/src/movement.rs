use crate::coordinates::WorldPoint;
use crate::tuning::{
    ARRIVAL_DISTANCE, BASE_RECHARGE, BASE_TOLERANCE, RECHARGE_CAP, SPEED_STEP_PER_LEVEL,
    STORM_DRAIN_FACTOR,
};
use crate::weather::WeatherKind;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementOutcome {
    /// Parked at base; nothing to do.
    Idle,
    Moving,
    ArrivedAtDelivery,
    Docked,
    /// Reached a target that is neither a delivery nor the base.
    Holding,
    BatteryDepleted,
}

pub fn speed_multiplier(speed_level: u32) -> f32 {
    1.0 + speed_level as f32 * SPEED_STEP_PER_LEVEL
}

pub fn drain_per_frame(base_drain: f32, weather: WeatherKind) -> f32 {
    if weather == WeatherKind::Storm {
        base_drain * STORM_DRAIN_FACTOR
    } else {
        base_drain
    }
}

pub fn advance_drone(world: &mut World, delta: f32) -> MovementOutcome {
    if world.drone.at_base {
        return MovementOutcome::Idle;
    }

    let (dx, dy) = world.drone.position.offset_to(world.drone.target);
    let distance = (dx * dx + dy * dy).sqrt();

    if distance > ARRIVAL_DISTANCE {
        let speed = world.drone.speed * speed_multiplier(world.upgrades.speed);
        // Never step past the target; a long frame lands exactly on it.
        let step = (speed * delta).min(distance);
        world.drone.position = WorldPoint::new(
            world.drone.position.x + dx / distance * step,
            world.drone.position.y + dy / distance * step,
        );

        let drain = drain_per_frame(world.settings().battery_drain, world.weather) * delta;
        world.battery -= drain;
        if world.battery <= 0.0 {
            world.battery = 0.0;
            tracing::info!(tick = world.tick, "battery depleted");
            return MovementOutcome::BatteryDepleted;
        }
        return MovementOutcome::Moving;
    }

    if world.drone.is_delivering && world.active_delivery.is_some() {
        return MovementOutcome::ArrivedAtDelivery;
    }

    if world.drone.position.within_box(world.base.position, BASE_TOLERANCE) {
        world.drone.at_base = true;
        // Capped at the stock capacity even when upgraded.
        world.battery = (world.battery + BASE_RECHARGE).min(RECHARGE_CAP);
        return MovementOutcome::Docked;
    }

    MovementOutcome::Holding
}
