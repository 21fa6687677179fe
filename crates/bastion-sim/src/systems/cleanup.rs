//! Cleanup system: runs despawn countdowns and removes stray projectiles.

use hecs::{Entity, World};

use bastion_core::components::{DespawnTimer, Projectile};
use bastion_core::types::{LaneBounds, Transform};

/// Count down every `DespawnTimer`, removing entities whose timer has run
/// out, and remove projectiles outside `projectile_bounds`.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, projectile_bounds: &LaneBounds) {
    despawn_buffer.clear();

    for (entity, timer) in world.query_mut::<&mut DespawnTimer>() {
        if timer.remaining_ticks == 0 {
            despawn_buffer.push(entity);
        } else {
            timer.remaining_ticks -= 1;
        }
    }

    for (entity, (transform, _projectile)) in world.query_mut::<(&Transform, &Projectile)>() {
        if !projectile_bounds.contains(transform.position) && !despawn_buffer.contains(&entity) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
