//! Respawn system: steps every defender slot and acts on what it reports.

use hecs::World;

use bastion_core::components::Unit;
use bastion_core::enums::{MatchPhase, UnitState};
use bastion_core::events::SimEvent;
use bastion_core::types::{Transform, Velocity};
use bastion_combat::respawn::SlotAction;

use crate::slots::DefenderSlot;
use crate::world_setup;

pub fn run(
    world: &mut World,
    slots: &mut [DefenderSlot],
    phase: MatchPhase,
    events: &mut Vec<SimEvent>,
) {
    for slot in slots.iter_mut() {
        let occupant_down = world
            .get::<&Unit>(slot.unit)
            .map(|unit| !unit.state.is_targetable())
            .unwrap_or(true);

        match slot.slot.step(phase, occupant_down) {
            SlotAction::None => {}
            SlotAction::Vacated => {
                tracing::debug!(
                    slot = slot.index,
                    unit_id = %slot.unit_id,
                    cooldown_secs = slot.slot.cooldown_secs(),
                    "defender down, slot cooling"
                );
            }
            SlotAction::Respawn => respawn(world, slot, events),
            SlotAction::Ended => end(world, slot),
        }
    }
}

/// Bring the slot's defender back at its home position. A defender that
/// has left the world is spawned again from the slot's template.
fn respawn(world: &mut World, slot: &mut DefenderSlot, events: &mut Vec<SimEvent>) {
    if !world.contains(slot.unit) {
        slot.unit = world_setup::spawn_unit(world, &slot.template, slot.unit_id, slot.home);
    } else if let Err(error) = world_setup::setup_unit(world, slot.unit) {
        tracing::error!(slot = slot.index, unit_id = %slot.unit_id, %error, "defender setup failed, slot skipped");
        return;
    }

    if let Ok(mut transform) = world.get::<&mut Transform>(slot.unit) {
        transform.position = slot.home;
    }
    tracing::debug!(slot = slot.index, unit_id = %slot.unit_id, "defender respawned");
    events.push(SimEvent::DefenderRespawned {
        slot: slot.index,
        unit: slot.unit_id,
    });
}

fn end(world: &mut World, slot: &DefenderSlot) {
    if let Ok(mut unit) = world.get::<&mut Unit>(slot.unit) {
        if unit.state != UnitState::Dead {
            unit.state = UnitState::Ended;
        }
    }
    if let Ok(mut velocity) = world.get::<&mut Velocity>(slot.unit) {
        *velocity = Velocity::default();
    }
}
