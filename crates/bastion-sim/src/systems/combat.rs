//! Combat system: attack cadence and damage for units in `Attacking`.
//!
//! Melee units strike their sensed target directly. Ranged units fire a
//! projectile along their facing and let the projectile system resolve the hit.

use hecs::{Entity, World};

use bastion_core::components::{AttackTimer, Unit, UnitStats};
use bastion_core::enums::{AttackDelivery, Faction, UnitState};
use bastion_core::error::TargetError;
use bastion_core::events::SimEvent;
use bastion_core::types::{Transform, UnitId};
use bastion_combat::damage::resolve_damage;
use bastion_combat::fsm::UnitBehavior;

use crate::sensor::TargetingSensor;
use crate::world_setup;

enum Strike {
    Melee {
        attacker: UnitId,
        target: Entity,
        attack_power: f64,
    },
    Ranged {
        owner: UnitId,
        faction: Faction,
        attack_power: f64,
        transform: Transform,
        speed: f64,
    },
}

/// Resolve the unit a sensor hit refers to, if it can still be struck.
pub fn validate_target(world: &World, target: Option<Entity>) -> Result<Entity, TargetError> {
    let target = target.ok_or(TargetError::InvalidTarget)?;
    let unit = world
        .get::<&Unit>(target)
        .map_err(|_| TargetError::InvalidTarget)?;
    let stats = world
        .get::<&UnitStats>(target)
        .map_err(|_| TargetError::InvalidTarget)?;
    if unit.state.is_targetable() && !stats.is_depleted() {
        Ok(target)
    } else {
        Err(TargetError::InvalidTarget)
    }
}

pub fn run(world: &mut World, dt: f64, current_tick: u64, events: &mut Vec<SimEvent>) {
    let mut strikes = Vec::new();
    let mut lost_target = Vec::new();

    {
        let mut query = world.query::<(
            &Unit,
            &UnitStats,
            &Transform,
            &TargetingSensor,
            &mut AttackTimer,
        )>();
        for (entity, (unit, stats, transform, sensor, timer)) in query.iter() {
            if unit.state != UnitState::Attacking {
                continue;
            }

            let target = match validate_target(world, sensor.hit_entity()) {
                Ok(target) => target,
                Err(error) => {
                    tracing::debug!(unit_id = %unit.id, tick = current_tick, %error, "dropping target");
                    lost_target.push(entity);
                    continue;
                }
            };

            if !unit.kind.attack(timer, stats.attack_period, dt) {
                continue;
            }

            let delivery = unit
                .template
                .as_ref()
                .map(|t| t.delivery)
                .unwrap_or_default();
            match delivery {
                AttackDelivery::Melee => strikes.push(Strike::Melee {
                    attacker: unit.id,
                    target,
                    attack_power: stats.attack_power,
                }),
                AttackDelivery::Projectile { speed } => strikes.push(Strike::Ranged {
                    owner: unit.id,
                    faction: unit.kind.faction(),
                    attack_power: stats.attack_power,
                    transform: *transform,
                    speed,
                }),
            }
        }
    }

    for entity in lost_target {
        if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
            unit.state = UnitState::Moving;
        }
        if let Ok(mut sensor) = world.get::<&mut TargetingSensor>(entity) {
            sensor.clear();
        }
    }

    for strike in strikes {
        match strike {
            Strike::Melee {
                attacker,
                target,
                attack_power,
            } => {
                let Ok(target_id) = world.get::<&Unit>(target).map(|u| u.id) else {
                    continue;
                };
                let Ok(mut stats) = world.get::<&mut UnitStats>(target) else {
                    continue;
                };
                let damage = resolve_damage(attack_power, stats.shield);
                stats.apply_damage(damage);
                tracing::trace!(
                    attacker = %attacker,
                    target = %target_id,
                    damage,
                    hp = stats.current_hp,
                    "melee hit"
                );
                events.push(SimEvent::AttackLanded {
                    attacker,
                    target: target_id,
                    damage,
                });
            }
            Strike::Ranged {
                owner,
                faction,
                attack_power,
                transform,
                speed,
            } => {
                world_setup::spawn_projectile(
                    world,
                    owner,
                    faction,
                    attack_power,
                    transform.position,
                    transform.facing,
                    speed,
                );
                events.push(SimEvent::ProjectileFired { owner });
            }
        }
    }
}
