//! Structure contact: the first time an attacker reaches the structure line,
//! the two trade one blow each through the damage model.

use hecs::{Entity, World};

use bastion_core::components::*;
use bastion_core::enums::UnitKind;
use bastion_core::events::SimEvent;
use bastion_core::types::{Transform, UnitId};
use bastion_combat::damage::resolve_damage;

/// Returns true on the tick the structure's HP first reaches zero.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) -> bool {
    let Some((structure, line, attack_power, shield)) = world
        .query::<(&Structure, &StructureStats, &Transform, &Collider)>()
        .iter()
        .find(|(_, (_, stats, _, _))| stats.current_hp > 0.0)
        .map(|(entity, (_, stats, transform, collider))| {
            (
                entity,
                transform.position.x - collider.radius,
                stats.attack_power,
                stats.shield,
            )
        })
    else {
        return false;
    };

    let contacts: Vec<(Entity, UnitId, f64, f64)> = world
        .query::<(&Unit, &UnitStats, &Transform, &Collider)>()
        .without::<&StructureContact>()
        .iter()
        .filter(|(_, (unit, _, _, _))| unit.kind == UnitKind::Attacker && unit.state.is_targetable())
        .filter(|(_, (_, _, transform, collider))| transform.position.x + collider.radius >= line)
        .map(|(entity, (unit, stats, _, _))| (entity, unit.id, stats.attack_power, stats.shield))
        .collect();

    let mut destroyed = false;
    for (attacker, id, attacker_power, attacker_shield) in contacts {
        let damage_taken = resolve_damage(attacker_power, shield);
        let damage_dealt = resolve_damage(attack_power, attacker_shield);

        let mut fell = false;
        if let Ok(mut stats) = world.get::<&mut StructureStats>(structure) {
            if stats.current_hp <= 0.0 {
                break;
            }
            stats.current_hp = (stats.current_hp - damage_taken).max(0.0);
            fell = stats.current_hp <= 0.0;
        }
        if let Ok(mut stats) = world.get::<&mut UnitStats>(attacker) {
            stats.apply_damage(damage_dealt);
        }
        let _ = world.insert_one(attacker, StructureContact);

        tracing::debug!(attacker = %id, damage_taken, damage_dealt, "structure contact");
        events.push(SimEvent::StructureHit {
            attacker: id,
            damage_taken,
            damage_dealt,
        });

        if fell {
            tracing::info!(attacker = %id, "structure destroyed");
            events.push(SimEvent::StructureDestroyed);
            destroyed = true;
            break;
        }
    }
    destroyed
}
