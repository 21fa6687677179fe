//! Combat rules for BASTION.
//!
//! Pure, ECS-free rules: the damage mitigation formula, unit behaviour
//! profiles and state machine, attack cadence, respawn slot lifecycle and
//! the match phase machine. Everything here operates on plain data so it
//! can be tested without a world.

pub mod damage;
pub mod fsm;
pub mod phase;
pub mod profiles;
pub mod respawn;

pub use bastion_core as core;
