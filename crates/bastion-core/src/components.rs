//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the combat crate
//! and in the simulation systems, not here.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::templates::UnitTemplate;
use crate::types::UnitId;

/// Live combat attributes of one unit, initialised from its template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub max_hp: f64,
    /// Always within `0..=max_hp`.
    pub current_hp: f64,
    pub attack_power: f64,
    /// Seconds between attacks. Always > 0.
    pub attack_period: f64,
    pub shield: f64,
    pub move_speed: f64,
}

impl UnitStats {
    pub fn from_template(template: &UnitTemplate) -> Self {
        Self {
            max_hp: template.max_hp,
            current_hp: template.max_hp,
            attack_power: template.attack_power,
            attack_period: template.attack_period,
            shield: template.shield,
            move_speed: template.move_speed,
        }
    }

    /// Subtract already-mitigated damage, clamping at zero. Returns the HP actually removed.
    pub fn apply_damage(&mut self, amount: f64) -> f64 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp - amount.max(0.0)).max(0.0);
        before - self.current_hp
    }

    pub fn is_depleted(&self) -> bool {
        self.current_hp <= 0.0
    }
}

/// Identity and behaviour state of a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub state: UnitState,
    /// Shared, read-only design data this unit was set up from.
    #[serde(skip)]
    pub template: Option<Arc<UnitTemplate>>,
}

/// Faction tag used by sensors and collision filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionTag(pub Faction);

/// Circular body used for probe and projectile hits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

/// Seconds accumulated toward the next attack.
/// Reset only when an attack fires, never on state entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackTimer {
    pub elapsed_secs: f64,
}

/// One-shot deferred removal, counted down by the cleanup system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DespawnTimer {
    pub remaining_ticks: u64,
}

/// Marks the lane-end structure the attackers are trying to bring down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Structure;

/// Structure attributes. The structure only fights on contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureStats {
    pub max_hp: f64,
    pub current_hp: f64,
    pub shield: f64,
    pub attack_power: f64,
}

/// Set on an attacker once it has traded blows with the structure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StructureContact;

/// A bullet fired by a ranged unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: UnitId,
    /// Owner's attack power captured at fire time.
    pub attack_power: f64,
    pub faction: Faction,
    /// Cleared on first hit so a bullet damages one unit only.
    pub live: bool,
}
