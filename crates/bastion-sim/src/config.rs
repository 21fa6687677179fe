//! Match configuration.
//!
//! `SimConfig` carries engine-level knobs (seed, pacing). `MatchConfig`
//! describes one match: energy pool, lane geometry, defender slots, the
//! structure, the template roster and an optional scripted spawn plan.
//! Defaults reproduce the starter match; a JSON file may override any part.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bastion_core::constants::*;
use bastion_core::enums::UnitKind;
use bastion_core::error::ConfigurationError;
use bastion_core::templates::{Roster, UnitTemplate};
use bastion_core::types::LaneBounds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Template(#[from] ConfigurationError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub max: u32,
    /// Starting energy; `None` starts full.
    pub initial: Option<u32>,
    pub regen_per_tick: u32,
    pub regen_interval_secs: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max: ENERGY_MAX,
            initial: None,
            regen_per_tick: ENERGY_REGEN_PER_TICK,
            regen_interval_secs: ENERGY_REGEN_INTERVAL_SECS,
        }
    }
}

/// A defender position supervised by a respawn slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub template: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    pub x: f64,
    pub max_hp: f64,
    pub shield: f64,
    pub attack_power: f64,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            x: STRUCTURE_X,
            max_hp: STRUCTURE_MAX_HP,
            shield: STRUCTURE_SHIELD,
            attack_power: STRUCTURE_ATTACK,
        }
    }
}

/// One scripted spawn: `template` enters a random lane at `at_secs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSpawnConfig {
    pub at_secs: f64,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub energy: EnergyConfig,
    pub respawn_cooldown_secs: f64,
    pub attacker_bounds: LaneBounds,
    pub projectile_bounds: LaneBounds,
    /// Lane centre lines used by the spawn plan.
    pub lanes: Vec<f64>,
    pub attacker_spawn_x: f64,
    pub templates: Vec<UnitTemplate>,
    pub defender_slots: Vec<SlotConfig>,
    pub structure: Option<StructureConfig>,
    /// Playing longer than this loses the match.
    pub time_limit_secs: Option<f64>,
    pub spawn_plan: Vec<PlannedSpawnConfig>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            energy: EnergyConfig::default(),
            respawn_cooldown_secs: RESPAWN_COOLDOWN_SECS,
            attacker_bounds: LaneBounds::new(ATTACKER_BOUNDS_X, ATTACKER_BOUNDS_Y),
            projectile_bounds: LaneBounds::new(PROJECTILE_BOUNDS_X, PROJECTILE_BOUNDS_Y),
            lanes: LANE_YS.to_vec(),
            attacker_spawn_x: ATTACKER_SPAWN_X,
            templates: vec![
                UnitTemplate::slime(),
                UnitTemplate::brute(),
                UnitTemplate::archer(),
            ],
            defender_slots: LANE_YS
                .iter()
                .map(|&y| SlotConfig {
                    template: "archer".into(),
                    x: DEFENDER_SLOT_X,
                    y,
                })
                .collect(),
            structure: Some(StructureConfig::default()),
            time_limit_secs: None,
            spawn_plan: Vec::new(),
        }
    }
}

impl MatchConfig {
    /// A bare lane: default energy and templates, no slots, no structure.
    pub fn empty() -> Self {
        Self {
            defender_slots: Vec::new(),
            structure: None,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Build the shared template roster.
    pub fn roster(&self) -> Result<Roster, ConfigError> {
        Ok(Roster::from_templates(self.templates.iter().cloned())?)
    }

    /// Check everything a match needs before any entity exists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.energy.max == 0 {
            return invalid("energy.max must be positive".into());
        }
        if self.energy.regen_per_tick == 0 {
            return invalid("energy.regen_per_tick must be positive".into());
        }
        if !(self.energy.regen_interval_secs.is_finite() && self.energy.regen_interval_secs > 0.0) {
            return invalid("energy.regen_interval_secs must be positive".into());
        }
        if !(self.respawn_cooldown_secs.is_finite() && self.respawn_cooldown_secs >= 0.0) {
            return invalid("respawn_cooldown_secs must be zero or positive".into());
        }
        if let Some(limit) = self.time_limit_secs {
            if !(limit.is_finite() && limit > 0.0) {
                return invalid("time_limit_secs must be positive".into());
            }
        }
        if let Some(structure) = &self.structure {
            if !(structure.max_hp.is_finite() && structure.max_hp > 0.0) {
                return invalid("structure.max_hp must be positive".into());
            }
        }

        let roster = self.roster()?;

        for (i, slot) in self.defender_slots.iter().enumerate() {
            match roster.get(&slot.template) {
                Some(t) if t.kind == UnitKind::Defender => {}
                Some(_) => {
                    return invalid(format!(
                        "defender_slots[{i}] template `{}` is not a defender",
                        slot.template
                    ))
                }
                None => {
                    return invalid(format!(
                        "defender_slots[{i}] references unknown template `{}`",
                        slot.template
                    ))
                }
            }
        }

        if !self.spawn_plan.is_empty() && self.lanes.is_empty() {
            return invalid("spawn_plan needs at least one lane".into());
        }
        for entry in &self.spawn_plan {
            match roster.get(&entry.template) {
                Some(t) if t.kind == UnitKind::Attacker => {}
                Some(_) => {
                    return invalid(format!(
                        "spawn_plan template `{}` is not an attacker",
                        entry.template
                    ))
                }
                None => {
                    return invalid(format!(
                        "spawn_plan references unknown template `{}`",
                        entry.template
                    ))
                }
            }
        }

        Ok(())
    }
}
