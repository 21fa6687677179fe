//! Simulation engine for BASTION.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, and produces
//! MatchSnapshots for whatever sits in front of it.

pub mod config;
pub mod energy;
pub mod engine;
pub mod sensor;
pub mod slots;
pub mod spawn;
pub mod systems;
pub mod tracker;
pub mod world_setup;

pub use bastion_core as core;
pub use config::{ConfigError, MatchConfig, SimConfig};
pub use engine::SimulationEngine;
pub use tracker::{SessionTracker, TrackerError};
