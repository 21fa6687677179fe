//! Unit AI system: applies the behaviour FSM to every unit.

use hecs::World;

use bastion_core::components::{Unit, UnitStats};
use bastion_core::enums::MatchPhase;
use bastion_combat::fsm::{UnitBehavior, UnitContext};

use crate::sensor::TargetingSensor;

/// Evaluate this tick's transition for every unit from its fresh sensor result.
pub fn run(world: &mut World, phase: MatchPhase, current_tick: u64) {
    for (_entity, (unit, stats, sensor)) in
        world.query_mut::<(&mut Unit, &UnitStats, &TargetingSensor)>()
    {
        let ctx = UnitContext {
            kind: unit.kind,
            state: unit.state,
            current_hp: stats.current_hp,
            phase,
            has_target: sensor.has_hit(),
        };
        let update = unit.kind.transition(&ctx);
        if update.state_changed {
            tracing::trace!(
                unit_id = %unit.id,
                tick = current_tick,
                from = ?unit.state,
                to = ?update.new_state,
                "unit state changed"
            );
            unit.state = update.new_state;
        }
    }
}
