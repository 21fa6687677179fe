//! Snapshot system: queries the ECS world and builds a complete MatchSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use bastion_core::components::*;
use bastion_core::enums::MatchPhase;
use bastion_core::events::SimEvent;
use bastion_core::state::*;
use bastion_core::types::{SimTime, Transform};

use crate::energy::EnergyLedger;
use crate::slots::DefenderSlot;

/// Build a complete MatchSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: MatchPhase,
    session_id: Option<u64>,
    energy: &EnergyLedger,
    slots: &[DefenderSlot],
    events: Vec<SimEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        phase,
        session_id,
        energy: energy.view(),
        units: build_units(world),
        slots: slots.iter().map(DefenderSlot::view).collect(),
        structure: build_structure(world),
        projectiles: world.query::<&Projectile>().iter().count() as u32,
        events,
    }
}

/// Build UnitView list, ordered by unit id.
fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(&Unit, &UnitStats, &FactionTag, &Transform)>()
        .iter()
        .map(|(_, (unit, stats, faction, transform))| UnitView {
            id: unit.id,
            kind: unit.kind,
            faction: faction.0,
            state: unit.state,
            template: unit
                .template
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            current_hp: stats.current_hp,
            max_hp: stats.max_hp,
            position: transform.position,
            facing: transform.facing,
        })
        .collect();

    units.sort_by_key(|u| u.id.0);
    units
}

fn build_structure(world: &World) -> Option<StructureView> {
    world
        .query::<(&Structure, &StructureStats, &Transform)>()
        .iter()
        .next()
        .map(|(_, (_, stats, transform))| StructureView {
            position: transform.position,
            current_hp: stats.current_hp,
            max_hp: stats.max_hp,
        })
}
