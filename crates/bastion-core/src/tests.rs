#[cfg(test)]
mod tests {
    use glam::DVec2;

    use crate::commands::PlayerCommand;
    use crate::components::UnitStats;
    use crate::enums::*;
    use crate::error::{ConfigurationError, SpawnError};
    use crate::events::SimEvent;
    use crate::state::{EnergyView, MatchSnapshot};
    use crate::templates::{Roster, UnitTemplate};
    use crate::types::{secs_to_ticks, LaneBounds, SimTime, Transform, UnitId};

    /// Commands arrive from an input layer as tagged JSON.
    #[test]
    fn test_player_command_from_json() {
        let json = r#"{"type":"SpawnUnit","template":"slime","x":-8.0,"y":2.0}"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::SpawnUnit {
                template: "slime".into(),
                x: -8.0,
                y: 2.0
            }
        );

        let start: PlayerCommand = serde_json::from_str(r#"{"type":"StartMatch"}"#).unwrap();
        assert_eq!(start, PlayerCommand::StartMatch);
    }

    #[test]
    fn test_spawn_rejected_event_carries_reason() {
        let event = SimEvent::SpawnRejected {
            template: "slime".into(),
            error: SpawnError::InsufficientEnergy {
                available: 1,
                cost: 3,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("InsufficientEnergy"));
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = MatchSnapshot {
            energy: EnergyView { current: 4, max: 10 },
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"current\":4"));
    }

    #[test]
    fn test_energy_view_fill() {
        assert_eq!(EnergyView { current: 5, max: 10 }.fill(), 0.5);
        assert_eq!(EnergyView { current: 0, max: 0 }.fill(), 0.0);
    }

    #[test]
    fn test_unit_kind_faction() {
        assert_eq!(UnitKind::Attacker.faction(), Faction::Attacker);
        assert_eq!(UnitKind::Defender.faction(), Faction::Defender);
    }

    #[test]
    fn test_unit_state_flags() {
        assert!(UnitState::Dead.is_terminal());
        assert!(UnitState::Ended.is_terminal());
        assert!(!UnitState::Disabled.is_terminal());
        assert!(UnitState::Moving.is_targetable());
        assert!(UnitState::Attacking.is_targetable());
        assert!(!UnitState::Disabled.is_targetable());
        assert!(!UnitState::Dead.is_targetable());
    }

    #[test]
    fn test_match_phase_decided() {
        assert!(MatchPhase::Win.is_decided());
        assert!(MatchPhase::Lose.is_decided());
        assert!(!MatchPhase::Playing.is_decided());
        assert!(!MatchPhase::End.is_decided());
    }

    // ---- Stats ----

    #[test]
    fn test_stats_from_template() {
        let stats = UnitStats::from_template(&UnitTemplate::slime());
        assert_eq!(stats.max_hp, 100.0);
        assert_eq!(stats.current_hp, 100.0);
        assert_eq!(stats.attack_power, 50.0);
        assert_eq!(stats.attack_period, 1.0);
    }

    #[test]
    fn test_apply_damage_clamps_at_zero() {
        let mut stats = UnitStats::from_template(&UnitTemplate::slime());
        assert_eq!(stats.apply_damage(30.0), 30.0);
        assert_eq!(stats.current_hp, 70.0);
        assert_eq!(stats.apply_damage(500.0), 70.0);
        assert_eq!(stats.current_hp, 0.0);
        assert!(stats.is_depleted());
    }

    #[test]
    fn test_apply_negative_damage_is_ignored() {
        let mut stats = UnitStats::from_template(&UnitTemplate::slime());
        stats.apply_damage(-10.0);
        assert_eq!(stats.current_hp, 100.0);
    }

    // ---- Templates ----

    #[test]
    fn test_starter_templates_are_valid() {
        for t in [
            UnitTemplate::slime(),
            UnitTemplate::brute(),
            UnitTemplate::archer(),
        ] {
            assert!(t.validate().is_ok(), "{} should validate", t.name);
        }
    }

    #[test]
    fn test_template_rejects_zero_attack_period() {
        let mut t = UnitTemplate::slime();
        t.attack_period = 0.0;
        assert!(matches!(
            t.validate(),
            Err(ConfigurationError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn test_template_rejects_nan_and_zero_hp() {
        let mut t = UnitTemplate::slime();
        t.attack_power = f64::NAN;
        assert!(t.validate().is_err());

        let mut t = UnitTemplate::slime();
        t.max_hp = 0.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_template_defaults_from_json() {
        let json = r#"{
            "name": "imp",
            "kind": "Attacker",
            "level": 1,
            "max_hp": 40.0,
            "attack_power": 10.0,
            "attack_period": 0.5
        }"#;
        let t: UnitTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.shield, 0.0);
        assert_eq!(t.spawn_energy_cost, 0);
        assert_eq!(t.delivery, AttackDelivery::Melee);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_roster_shares_templates() {
        let roster = Roster::starter();
        let a = roster.get("slime").unwrap();
        let b = roster.get("slime").unwrap();
        assert!(std::sync::Arc::ptr_eq(&a, &b));
        assert!(roster.get("dragon").is_none());
    }

    #[test]
    fn test_roster_rejects_invalid_template() {
        let mut bad = UnitTemplate::archer();
        bad.name = "broken".into();
        bad.attack_period = -1.0;
        let result = Roster::from_templates([UnitTemplate::slime(), bad]);
        assert!(result.is_err());
    }

    // ---- Types ----

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0), 50);
        assert_eq!(secs_to_ticks(10.0), 500);
        assert_eq!(secs_to_ticks(0.05), 3);
        assert_eq!(secs_to_ticks(0.0), 0);
        assert_eq!(secs_to_ticks(-2.0), 0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..50 {
            time.advance();
        }
        assert_eq!(time.tick, 50);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lane_bounds_contains() {
        let bounds = LaneBounds::new(9.0, 5.0);
        assert!(bounds.contains(DVec2::new(9.0, -5.0)));
        assert!(!bounds.contains(DVec2::new(9.01, 0.0)));
        assert!(!bounds.contains(DVec2::new(0.0, -5.5)));
    }

    #[test]
    fn test_transform_rotates_local_direction() {
        let facing_left = Transform::new(DVec2::ZERO, DVec2::new(-2.0, 0.0));
        let forward = facing_left.to_world_direction(DVec2::X);
        assert!((forward - DVec2::new(-1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_unit_id_display() {
        assert_eq!(UnitId(7).to_string(), "u7");
    }
}
