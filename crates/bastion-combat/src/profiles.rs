//! Per-kind behaviour profiles: what a unit senses, whom it targets and how it goes down.

use glam::DVec2;

use bastion_core::constants::{ATTACKER_SENSOR_LENGTH, DEFENDER_SENSOR_LENGTH};
use bastion_core::enums::{Faction, UnitKind, UnitState};

/// Directional probe parameters in the unit's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSpec {
    /// Cast direction in local space; local +x is the unit's facing.
    pub direction: DVec2,
    pub length: f64,
    /// Hits on this faction are skipped.
    pub own_faction: Faction,
    /// The first hit on this faction becomes the target.
    pub target_faction: Faction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorProfile {
    pub sensor: SensorSpec,
    /// Whether the unit translates while `Moving`.
    pub mobile: bool,
    /// State entered when HP reaches zero.
    pub knocked_out_state: UnitState,
    /// Whether the lane bounds check applies.
    pub bounded: bool,
}

pub fn get_profile(kind: UnitKind) -> BehaviorProfile {
    match kind {
        UnitKind::Attacker => BehaviorProfile {
            sensor: SensorSpec {
                direction: DVec2::X,
                length: ATTACKER_SENSOR_LENGTH,
                own_faction: Faction::Attacker,
                target_faction: Faction::Defender,
            },
            mobile: true,
            knocked_out_state: UnitState::Dead,
            bounded: true,
        },
        UnitKind::Defender => BehaviorProfile {
            sensor: SensorSpec {
                direction: DVec2::X,
                length: DEFENDER_SENSOR_LENGTH,
                own_faction: Faction::Defender,
                target_faction: Faction::Attacker,
            },
            mobile: false,
            knocked_out_state: UnitState::Disabled,
            bounded: false,
        },
    }
}
