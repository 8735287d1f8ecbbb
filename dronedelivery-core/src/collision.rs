use crate::coordinates::WorldPoint;
use crate::entities::Obstacle;
use crate::events::SimEvent;
use crate::tuning::{COLLISION_BUFFER, SCORE_PENALTY};
use crate::world::World;

/// Axis-aligned test against the obstacle box grown by a fixed buffer.
/// Trees and buildings share the same rectangular hitbox.
pub fn overlaps(position: WorldPoint, obstacle: &Obstacle) -> bool {
    (position.x - obstacle.position.x).abs() < obstacle.width / 2.0 + COLLISION_BUFFER
        && (position.y - obstacle.position.y).abs() < obstacle.height / 2.0 + COLLISION_BUFFER
}

/// Each overlapping obstacle applies its own penalty, tested against the
/// drone's position at that moment (after any earlier snap back to base).
pub fn resolve_collisions(world: &mut World) -> Vec<SimEvent> {
    let mut events = Vec::new();

    for obstacle_index in 0..world.obstacles.len() {
        let obstacle = world.obstacles[obstacle_index];
        if !overlaps(world.drone.position, &obstacle) {
            continue;
        }

        world.score = world.score.saturating_sub(SCORE_PENALTY);
        world.drone.dock(world.base.position);
        let abandoned = world.active_delivery.take();
        tracing::warn!(
            obstacle_index,
            kind = ?obstacle.kind,
            ?abandoned,
            score = world.score,
            "drone collided with obstacle"
        );
        events.push(SimEvent::Collision { obstacle_index });
    }

    events
}
