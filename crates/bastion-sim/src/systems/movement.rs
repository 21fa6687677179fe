//! Kinematic integration system.
//!
//! Sets unit velocity from behaviour state, then integrates every entity
//! with a velocity: position += velocity * dt.

use hecs::World;

use bastion_core::components::{Unit, UnitStats};
use bastion_core::types::{Transform, Velocity};
use bastion_combat::fsm::is_moving;

/// Units in `Moving` advance along their facing at template speed.
/// Every other state holds position.
pub fn steer(world: &mut World) {
    for (_entity, (unit, stats, transform, velocity)) in
        world.query_mut::<(&Unit, &UnitStats, &Transform, &mut Velocity)>()
    {
        velocity.linear = if is_moving(unit.kind, unit.state) {
            transform.facing * stats.move_speed
        } else {
            glam::DVec2::ZERO
        };
    }
}

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (transform, velocity)) in world.query_mut::<(&mut Transform, &Velocity)>() {
        transform.position += velocity.linear * dt;
    }
}
