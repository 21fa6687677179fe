//! Damage mitigation.
//!
//! `final = attack² / (attack + shield)`: shield 0 passes full damage, equal
//! attack and shield halves it, and a large shield drives damage toward zero
//! without reaching it while attack is positive.

use bastion_core::constants::MIN_DAMAGE;

/// Convert raw attack power and target shield into HP loss.
///
/// Negative or NaN inputs are treated as zero. When both are zero the
/// minimum damage floor applies so two harmless units cannot stall forever.
pub fn resolve_damage(attack_power: f64, shield: f64) -> f64 {
    let attack = attack_power.max(0.0);
    if attack + shield.max(0.0) > 0.0 {
        (attack * mitigation_multiplier(attack, shield)).max(0.0)
    } else {
        MIN_DAMAGE
    }
}

/// Fraction of raw attack that survives mitigation (1.0 = unmitigated).
pub fn mitigation_multiplier(attack_power: f64, shield: f64) -> f64 {
    let attack = attack_power.max(0.0);
    let denom = attack + shield.max(0.0);
    if denom > 0.0 {
        attack / denom
    } else {
        1.0
    }
}
