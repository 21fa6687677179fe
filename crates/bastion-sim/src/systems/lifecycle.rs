//! Lifecycle system: knock-outs, lane bounds and match-end stand-down.

use hecs::{Entity, World};

use bastion_core::components::*;
use bastion_core::constants::ATTACKER_DESPAWN_GRACE_SECS;
use bastion_core::enums::{DeathCause, UnitState};
use bastion_core::events::SimEvent;
use bastion_core::types::{secs_to_ticks, LaneBounds, Transform, UnitId, Velocity};
use bastion_combat::profiles::get_profile;

use crate::sensor::TargetingSensor;

/// Move every unit whose HP ran out into its knocked-out state, and kill
/// bounded units that left the lane. Dead units get a despawn countdown.
pub fn run(world: &mut World, bounds: &LaneBounds, events: &mut Vec<SimEvent>) {
    let mut downed: Vec<(Entity, UnitId, UnitState, DeathCause)> = Vec::new();

    for (entity, (unit, stats, transform)) in world
        .query::<(&Unit, &UnitStats, &Transform)>()
        .iter()
    {
        if !unit.state.is_targetable() {
            continue;
        }
        let profile = get_profile(unit.kind);
        if stats.is_depleted() {
            downed.push((entity, unit.id, profile.knocked_out_state, DeathCause::Damage));
        } else if profile.bounded && !bounds.contains(transform.position) {
            downed.push((entity, unit.id, UnitState::Dead, DeathCause::OutOfBounds));
        }
    }

    let grace = secs_to_ticks(ATTACKER_DESPAWN_GRACE_SECS);
    for (entity, id, state, cause) in downed {
        if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
            unit.state = state;
        }
        if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
            *velocity = Velocity::default();
        }
        if let Ok(mut sensor) = world.get::<&mut TargetingSensor>(entity) {
            sensor.clear();
        }

        if state == UnitState::Dead {
            let remaining_ticks = match cause {
                DeathCause::Damage => grace,
                DeathCause::OutOfBounds => 0,
            };
            let _ = world.insert_one(entity, DespawnTimer { remaining_ticks });
        }

        tracing::debug!(unit_id = %id, ?state, ?cause, "unit down");
        events.push(SimEvent::UnitDied { unit: id, cause });
    }
}

/// Freeze the lane after the match is decided: every unit not already dead
/// becomes `Ended` and stops, and all projectiles are removed.
pub fn stand_down(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (_entity, (unit, velocity)) in world.query_mut::<(&mut Unit, &mut Velocity)>() {
        if unit.state != UnitState::Dead {
            unit.state = UnitState::Ended;
        }
        *velocity = Velocity::default();
    }
    for (_entity, sensor) in world.query_mut::<&mut TargetingSensor>() {
        sensor.clear();
    }

    despawn_buffer.clear();
    despawn_buffer.extend(world.query::<&Projectile>().iter().map(|(e, _)| e));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
