//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They own no state; everything lives in components or is passed in by
//! the engine.

pub mod cleanup;
pub mod combat;
pub mod lifecycle;
pub mod movement;
pub mod projectiles;
pub mod respawn;
pub mod sensing;
pub mod snapshot;
pub mod spawn_plan;
pub mod structure;
pub mod unit_ai;
