//! Entity spawn factories for setting up the simulation world.
//!
//! Creates units, the lane-end structure and projectiles with their
//! component bundles. Nothing here touches the energy ledger.

use std::sync::Arc;

use glam::DVec2;
use hecs::{Entity, World};

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::error::ConfigurationError;
use bastion_core::templates::UnitTemplate;
use bastion_core::types::{Transform, UnitId, Velocity};
use bastion_combat::fsm::UnitBehavior;

use crate::config::StructureConfig;
use crate::sensor::TargetingSensor;

/// Attackers face down the lane toward the structure, defenders face back up it.
pub fn facing_for(kind: UnitKind) -> DVec2 {
    match kind {
        UnitKind::Attacker => DVec2::X,
        UnitKind::Defender => DVec2::NEG_X,
    }
}

/// Spawn a unit bound to `template`, fully set up and in `Moving`.
///
/// `template` must already have passed validation.
pub fn spawn_unit(
    world: &mut World,
    template: &Arc<UnitTemplate>,
    id: UnitId,
    position: DVec2,
) -> Entity {
    let kind = template.kind;
    world.spawn((
        Unit {
            id,
            kind,
            state: UnitState::Moving,
            template: Some(template.clone()),
        },
        UnitStats::from_template(template),
        Transform::new(position, facing_for(kind)),
        Velocity::default(),
        FactionTag(kind.faction()),
        Collider {
            radius: template.hit_radius,
        },
        AttackTimer::default(),
        TargetingSensor::<Entity>::new(kind.sense()),
    ))
}

/// (Re)initialise a unit from its bound template: full HP, `Moving`, timers
/// and sensor cleared. Fails when the unit has no usable template, in which
/// case the entity is left untouched.
pub fn setup_unit(world: &mut World, entity: Entity) -> Result<(), ConfigurationError> {
    let template = world
        .get::<&Unit>(entity)
        .ok()
        .and_then(|unit| unit.template.clone())
        .ok_or(ConfigurationError::MissingTemplate)?;
    template.validate()?;

    if let Ok(mut unit) = world.get::<&mut Unit>(entity) {
        unit.state = UnitState::Moving;
    }
    if let Ok(mut stats) = world.get::<&mut UnitStats>(entity) {
        *stats = UnitStats::from_template(&template);
    }
    if let Ok(mut timer) = world.get::<&mut AttackTimer>(entity) {
        *timer = AttackTimer::default();
    }
    if let Ok(mut sensor) = world.get::<&mut TargetingSensor>(entity) {
        sensor.clear();
    }
    if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
        *velocity = Velocity::default();
    }
    let _ = world.remove_one::<StructureContact>(entity);
    Ok(())
}

/// Spawn the lane-end structure. It spans every lane at `config.x`.
pub fn spawn_structure(world: &mut World, config: &StructureConfig) -> Entity {
    world.spawn((
        Structure,
        StructureStats {
            max_hp: config.max_hp,
            current_hp: config.max_hp,
            shield: config.shield,
            attack_power: config.attack_power,
        },
        Transform::new(DVec2::new(config.x, 0.0), DVec2::NEG_X),
        FactionTag(Faction::Structure),
        Collider {
            radius: STRUCTURE_HIT_RADIUS,
        },
    ))
}

/// Spawn a bullet travelling along `direction`.
///
/// Bullets carry no `FactionTag`, so sensors never see them.
pub fn spawn_projectile(
    world: &mut World,
    owner: UnitId,
    faction: Faction,
    attack_power: f64,
    position: DVec2,
    direction: DVec2,
    speed: f64,
) -> Entity {
    let direction = direction.try_normalize().unwrap_or(DVec2::X);
    world.spawn((
        Projectile {
            owner,
            attack_power,
            faction,
            live: true,
        },
        Transform::new(position, direction),
        Velocity {
            linear: direction * speed,
        },
        Collider {
            radius: PROJECTILE_HIT_RADIUS,
        },
    ))
}
