//! Projectile hits: a live bullet damages the first opposing unit it overlaps,
//! then goes inert and is removed after a short grace countdown.

use hecs::{Entity, World};

use bastion_core::components::*;
use bastion_core::constants::PROJECTILE_DESPAWN_GRACE_SECS;
use bastion_core::enums::Faction;
use bastion_core::events::SimEvent;
use bastion_core::types::{secs_to_ticks, Transform, UnitId, Velocity};
use bastion_combat::damage::resolve_damage;

struct Body {
    entity: Entity,
    id: UnitId,
    faction: Faction,
    position: glam::DVec2,
    radius: f64,
}

pub fn run(world: &mut World, events: &mut Vec<SimEvent>) {
    let bodies: Vec<Body> = world
        .query::<(&Unit, &UnitStats, &FactionTag, &Transform, &Collider)>()
        .iter()
        .filter(|(_, (unit, stats, _, _, _))| unit.state.is_targetable() && !stats.is_depleted())
        .map(|(entity, (unit, _, faction, transform, collider))| Body {
            entity,
            id: unit.id,
            faction: faction.0,
            position: transform.position,
            radius: collider.radius,
        })
        .collect();

    let mut hits: Vec<(Entity, Projectile, Entity, UnitId)> = Vec::new();
    for (entity, (projectile, transform, collider)) in world
        .query::<(&Projectile, &Transform, &Collider)>()
        .iter()
    {
        if !projectile.live {
            continue;
        }
        let target = bodies.iter().find(|b| {
            b.faction != projectile.faction
                && b.faction != Faction::Structure
                && b.position.distance(transform.position) <= b.radius + collider.radius
        });
        if let Some(body) = target {
            hits.push((entity, *projectile, body.entity, body.id));
        }
    }

    let grace = secs_to_ticks(PROJECTILE_DESPAWN_GRACE_SECS);
    for (bullet, projectile, target, target_id) in hits {
        if let Ok(mut stats) = world.get::<&mut UnitStats>(target) {
            let damage = resolve_damage(projectile.attack_power, stats.shield);
            stats.apply_damage(damage);
            events.push(SimEvent::AttackLanded {
                attacker: projectile.owner,
                target: target_id,
                damage,
            });
        }

        if let Ok(mut p) = world.get::<&mut Projectile>(bullet) {
            p.live = false;
        }
        if let Ok(mut velocity) = world.get::<&mut Velocity>(bullet) {
            *velocity = Velocity::default();
        }
        let _ = world.insert_one(
            bullet,
            DespawnTimer {
                remaining_ticks: grace,
            },
        );
    }
}
