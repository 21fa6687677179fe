//! Sensing system: one sensor cast per unit per tick.

use hecs::{Entity, World};

use bastion_core::components::Unit;
use bastion_core::types::Transform;

use crate::sensor::{ProbeHit, TargetingSensor, WorldProbe};

/// Cast every unit's sensor against the current world.
///
/// Units that cannot fight (dead, disabled, ended) get an empty sensor.
/// Casts read the world as it stood at the start of the pass; results are
/// written back afterwards.
pub fn run(world: &mut World, scratch: &mut Vec<ProbeHit<Entity>>) {
    let mut results: Vec<(Entity, TargetingSensor)> = Vec::new();
    {
        let probe = WorldProbe::new(world);
        let mut query = world.query::<(&Unit, &Transform, &TargetingSensor)>();
        for (entity, (unit, transform, sensor)) in query.iter() {
            let mut sensor = *sensor;
            if unit.state.is_targetable() {
                sensor.cast(&probe, transform, entity, scratch);
            } else {
                sensor.clear();
            }
            results.push((entity, sensor));
        }
    }

    for (entity, result) in results {
        if let Ok(mut sensor) = world.get::<&mut TargetingSensor>(entity) {
            *sensor = result;
        }
    }
}
