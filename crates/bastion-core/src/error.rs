//! Error taxonomy shared by the simulation crates.
//!
//! None of these escape a tick. Each is handled where it occurs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::MatchPhase;

/// A template or unit binding that cannot produce a working unit.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ConfigurationError {
    #[error("template `{name}` is invalid: {reason}")]
    InvalidTemplate { name: String, reason: String },
    #[error("unit has no template bound")]
    MissingTemplate,
}

/// Why a spawn request produced no unit. No state changes on any of these.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum SpawnError {
    #[error("insufficient energy: have {available}, need {cost}")]
    InsufficientEnergy { available: u32, cost: u32 },
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("template `{0}` is a defender; defenders only enter play through their slots")]
    DefenderTemplate(String),
    #[error("spawn position ({x}, {y}) is not finite")]
    InvalidPosition { x: f64, y: f64 },
    #[error("match is not in progress (phase {0:?})")]
    MatchNotActive(MatchPhase),
}

/// A sensed or engaged target that no longer exists or can no longer be struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TargetError {
    #[error("target is no longer valid")]
    InvalidTarget,
}

/// A match phase change the phase table does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("cannot move match from {from:?} to {to:?}")]
pub struct PhaseError {
    pub from: MatchPhase,
    pub to: MatchPhase,
}
