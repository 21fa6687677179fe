//! Design-time unit templates and the roster that shares them.
//!
//! Templates are immutable once loaded. Every unit keeps an `Arc` to the
//! template it was set up from, so many units share one record.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::UNIT_HIT_RADIUS;
use crate::enums::{AttackDelivery, UnitKind};
use crate::error::ConfigurationError;

/// Immutable stat block for one unit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTemplate {
    pub name: String,
    pub kind: UnitKind,
    pub level: u32,
    pub max_hp: f64,
    pub attack_power: f64,
    /// Seconds between attacks (reciprocal of attack speed).
    pub attack_period: f64,
    #[serde(default)]
    pub shield: f64,
    #[serde(default)]
    pub move_speed: f64,
    #[serde(default)]
    pub spawn_energy_cost: u32,
    #[serde(default)]
    pub delivery: AttackDelivery,
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f64,
}

fn default_hit_radius() -> f64 {
    UNIT_HIT_RADIUS
}

impl UnitTemplate {
    /// Check that a unit set up from this template can run.
    /// A template that fails here must never produce a unit.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let fail = |reason: &str| ConfigurationError::InvalidTemplate {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(fail("name is empty"));
        }
        let numbers = [
            self.max_hp,
            self.attack_power,
            self.attack_period,
            self.shield,
            self.move_speed,
            self.hit_radius,
        ];
        if numbers.iter().any(|v| !v.is_finite()) {
            return Err(fail("stat is not finite"));
        }
        if self.max_hp <= 0.0 {
            return Err(fail("max_hp must be positive"));
        }
        if self.attack_period <= 0.0 {
            return Err(fail("attack_period must be positive"));
        }
        if self.attack_power < 0.0 || self.shield < 0.0 || self.move_speed < 0.0 {
            return Err(fail("attack_power, shield and move_speed must not be negative"));
        }
        if self.hit_radius <= 0.0 {
            return Err(fail("hit_radius must be positive"));
        }
        if let AttackDelivery::Projectile { speed } = self.delivery {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(fail("projectile speed must be positive"));
            }
        }
        Ok(())
    }

    /// Slime: the basic attacker from the starter roster.
    pub fn slime() -> Self {
        Self {
            name: "slime".into(),
            kind: UnitKind::Attacker,
            level: 1,
            max_hp: 100.0,
            attack_power: 50.0,
            attack_period: 1.0,
            shield: 0.0,
            move_speed: 1.0,
            spawn_energy_cost: 3,
            delivery: AttackDelivery::Melee,
            hit_radius: UNIT_HIT_RADIUS,
        }
    }

    /// Brute: slower, tougher attacker.
    pub fn brute() -> Self {
        Self {
            name: "brute".into(),
            kind: UnitKind::Attacker,
            level: 2,
            max_hp: 260.0,
            attack_power: 80.0,
            attack_period: 1.5,
            shield: 40.0,
            move_speed: 0.6,
            spawn_energy_cost: 5,
            delivery: AttackDelivery::Melee,
            hit_radius: UNIT_HIT_RADIUS,
        }
    }

    /// Archer: the basic ranged defender.
    pub fn archer() -> Self {
        Self {
            name: "archer".into(),
            kind: UnitKind::Defender,
            level: 1,
            max_hp: 120.0,
            attack_power: 30.0,
            attack_period: 1.25,
            shield: 20.0,
            move_speed: 0.0,
            spawn_energy_cost: 0,
            delivery: AttackDelivery::Projectile {
                speed: crate::constants::PROJECTILE_SPEED,
            },
            hit_radius: UNIT_HIT_RADIUS,
        }
    }
}

/// Named lookup of shared templates.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    templates: BTreeMap<String, Arc<UnitTemplate>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, rejecting the first invalid template.
    pub fn from_templates(
        templates: impl IntoIterator<Item = UnitTemplate>,
    ) -> Result<Self, ConfigurationError> {
        let mut roster = Self::new();
        for template in templates {
            roster.insert(template)?;
        }
        Ok(roster)
    }

    /// The roster shipped with the default match.
    pub fn starter() -> Self {
        let mut templates = BTreeMap::new();
        for t in [
            UnitTemplate::slime(),
            UnitTemplate::brute(),
            UnitTemplate::archer(),
        ] {
            templates.insert(t.name.clone(), Arc::new(t));
        }
        Self { templates }
    }

    pub fn insert(&mut self, template: UnitTemplate) -> Result<Arc<UnitTemplate>, ConfigurationError> {
        template.validate()?;
        let shared = Arc::new(template);
        self.templates.insert(shared.name.clone(), shared.clone());
        Ok(shared)
    }

    pub fn get(&self, name: &str) -> Option<Arc<UnitTemplate>> {
        self.templates.get(name).cloned()
    }
}
