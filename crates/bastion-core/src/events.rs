//! Events emitted by the simulation each tick for rendering and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::error::SpawnError;
use crate::types::UnitId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A unit entered play.
    UnitSpawned {
        unit: UnitId,
        kind: UnitKind,
        template: String,
    },
    /// A spawn request was refused; nothing was created or spent.
    SpawnRejected { template: String, error: SpawnError },
    /// Mitigated damage landed on a unit.
    AttackLanded {
        attacker: UnitId,
        target: UnitId,
        damage: f64,
    },
    /// A defender fired a projectile.
    ProjectileFired { owner: UnitId },
    /// A unit left play.
    UnitDied { unit: UnitId, cause: DeathCause },
    /// A defender slot refilled after its cooldown.
    DefenderRespawned { slot: usize, unit: UnitId },
    /// An attacker traded blows with the structure.
    StructureHit {
        attacker: UnitId,
        damage_taken: f64,
        damage_dealt: f64,
    },
    /// The structure fell.
    StructureDestroyed,
    PhaseChanged { from: MatchPhase, to: MatchPhase },
}
