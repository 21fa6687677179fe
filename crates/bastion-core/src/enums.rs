//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Side affiliation. Sensors skip their own faction and look for one target faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Attacker,
    Defender,
    Structure,
}

/// Which side of the lane a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Advances along the lane and strikes in melee.
    Attacker,
    /// Holds a fixed slot and engages at range.
    Defender,
}

impl UnitKind {
    pub fn faction(self) -> Faction {
        match self {
            UnitKind::Attacker => Faction::Attacker,
            UnitKind::Defender => Faction::Defender,
        }
    }
}

/// Unit behaviour state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    /// Advancing (attackers) or idling in place (defenders).
    #[default]
    Moving,
    /// Halted with a target in sensor range.
    Attacking,
    /// HP exhausted or out of bounds. Terminal.
    Dead,
    /// Defender knocked out, waiting on its respawn slot.
    Disabled,
    /// Match concluded. Terminal.
    Ended,
}

impl UnitState {
    /// States from which no further transition is evaluated.
    pub fn is_terminal(self) -> bool {
        matches!(self, UnitState::Dead | UnitState::Ended)
    }

    /// Whether a unit in this state can be sensed, struck or collided with.
    pub fn is_targetable(self) -> bool {
        matches!(self, UnitState::Moving | UnitState::Attacking)
    }
}

/// Top-level match phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Preparing,
    Playing,
    Win,
    Lose,
    End,
}

impl MatchPhase {
    /// Win or Lose: the match has a result and all units must stand down.
    pub fn is_decided(self) -> bool {
        matches!(self, MatchPhase::Win | MatchPhase::Lose)
    }
}

/// Respawn slot phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespawnState {
    /// A live defender occupies the slot.
    #[default]
    Active,
    /// The slot is empty and its cooldown is running.
    Cooling,
    /// Match over. Terminal.
    Ended,
}

/// How a unit delivers its attack once the cadence timer elapses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttackDelivery {
    /// Damage is applied to the sensed target immediately.
    #[default]
    Melee,
    /// A projectile is fired along the unit's facing.
    Projectile { speed: f64 },
}

/// Why a unit left play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Damage,
    OutOfBounds,
}
