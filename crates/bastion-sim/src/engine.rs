//! Simulation engine: the composition root of a match.
//!
//! `SimulationEngine` owns the hecs ECS world, the energy ledger, the
//! respawn slots and the match phase. It processes player commands, runs
//! all systems in a fixed order and produces `MatchSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::DVec2;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use bastion_core::commands::PlayerCommand;
use bastion_core::components::{Unit, UnitStats};
use bastion_core::enums::{MatchPhase, UnitKind};
use bastion_core::error::{PhaseError, SpawnError};
use bastion_core::events::SimEvent;
use bastion_core::state::{EnergyView, MatchSnapshot};
use bastion_core::templates::{Roster, UnitTemplate};
use bastion_core::types::{secs_to_ticks, SimTime, UnitId};
use bastion_combat::phase::MatchState;
use bastion_combat::respawn::RespawnSlot;

use crate::config::{ConfigError, MatchConfig, SimConfig};
use crate::energy::{EnergyLedger, RegenClock};
use crate::sensor::ProbeHit;
use crate::slots::DefenderSlot;
use crate::spawn;
use crate::systems;
use crate::systems::spawn_plan::SpawnPlan;
use crate::tracker::{mirror, NullTracker, SessionTracker};
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all match state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    match_state: MatchState,
    time_scale: f64,
    rng: ChaCha8Rng,
    next_unit_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    probe_scratch: Vec<ProbeHit<Entity>>,
    events: Vec<SimEvent>,

    config: MatchConfig,
    roster: Roster,
    energy: EnergyLedger,
    regen_clock: RegenClock,
    slots: Vec<DefenderSlot>,
    spawn_plan: SpawnPlan,
    time_limit_ticks: Option<u64>,

    tracker: Box<dyn SessionTracker>,
    session_id: Option<u64>,
    session_closed: bool,
}

impl SimulationEngine {
    /// Create an engine for the default match.
    pub fn new(config: SimConfig) -> Self {
        let match_config = MatchConfig::default();
        Self::build(config, match_config, Roster::starter())
    }

    /// Create an engine for a specific match, validating it first.
    pub fn with_match(config: SimConfig, match_config: MatchConfig) -> Result<Self, ConfigError> {
        match_config.validate()?;
        let roster = match_config.roster()?;
        Ok(Self::build(config, match_config, roster))
    }

    fn build(config: SimConfig, match_config: MatchConfig, roster: Roster) -> Self {
        let energy = ledger_for(&match_config);
        let regen_clock = RegenClock::new(match_config.energy.regen_interval_secs);
        Self {
            world: World::new(),
            time: SimTime::default(),
            match_state: MatchState::new(),
            time_scale: sanitize_time_scale(config.time_scale),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_unit_id: 1,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            probe_scratch: Vec::new(),
            events: Vec::new(),
            roster,
            energy,
            regen_clock,
            slots: Vec::new(),
            spawn_plan: SpawnPlan::default(),
            time_limit_ticks: None,
            config: match_config,
            tracker: Box::new(NullTracker),
            session_id: None,
            session_closed: false,
        }
    }

    /// Replace the session tracker.
    pub fn with_tracker(mut self, tracker: impl SessionTracker + 'static) -> Self {
        self.tracker = Box::new(tracker);
        self
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.process_commands();

        if self.match_state.is_running() {
            self.run_systems();
            self.time.advance();
        }

        self.mirror_attacks();
        let events = std::mem::take(&mut self.events);
        self.snapshot_with(events)
    }

    /// The current state without advancing or draining events.
    pub fn snapshot(&self) -> MatchSnapshot {
        self.snapshot_with(Vec::new())
    }

    fn snapshot_with(&self, events: Vec<SimEvent>) -> MatchSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.match_state.phase(),
            self.session_id,
            &self.energy,
            &self.slots,
            events,
        )
    }

    pub fn phase(&self) -> MatchPhase {
        self.match_state.phase()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn energy(&self) -> EnergyView {
        self.energy.view()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn match_config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn slots(&self) -> &[DefenderSlot] {
        &self.slots
    }

    pub fn session_id(&self) -> Option<u64> {
        self.session_id
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Find the entity carrying `id`.
    pub fn entity_of(&self, id: UnitId) -> Option<Entity> {
        self.world
            .query::<&Unit>()
            .iter()
            .find(|(_, unit)| unit.id == id)
            .map(|(entity, _)| entity)
    }

    /// Copy of a unit's live stats.
    pub fn unit_stats(&self, id: UnitId) -> Option<UnitStats> {
        let entity = self.entity_of(id)?;
        self.world.get::<&UnitStats>(entity).ok().map(|s| *s)
    }

    // --- Spawn controller ---

    /// Spawn a roster template at `position`.
    ///
    /// On failure nothing changes except a `SpawnRejected` event.
    pub fn try_spawn(&mut self, template: &str, position: DVec2) -> Result<UnitId, SpawnError> {
        match self.roster.get(template) {
            Some(template) => self.try_spawn_template(&template, position),
            None => {
                let error = SpawnError::UnknownTemplate(template.to_string());
                self.reject_spawn(template, &error);
                Err(error)
            }
        }
    }

    /// Spawn from an explicit template, which need not be in the roster.
    pub fn try_spawn_template(
        &mut self,
        template: &Arc<UnitTemplate>,
        position: DVec2,
    ) -> Result<UnitId, SpawnError> {
        let phase = self.match_state.phase();
        let result = if phase != MatchPhase::Playing {
            Err(SpawnError::MatchNotActive(phase))
        } else {
            let id = UnitId(self.next_unit_id);
            spawn::try_spawn(&mut self.world, &mut self.energy, template, id, position)
                .map(|_| id)
        };

        match result {
            Ok(id) => {
                self.next_unit_id += 1;
                tracing::info!(
                    unit_id = %id,
                    template = %template.name,
                    tick = self.time.tick,
                    energy = self.energy.current(),
                    "spawned unit"
                );
                self.events.push(SimEvent::UnitSpawned {
                    unit: id,
                    kind: template.kind,
                    template: template.name.clone(),
                });
                mirror("spawn", self.tracker.notify_spawn(template.level));
                Ok(id)
            }
            Err(error) => {
                self.reject_spawn(&template.name, &error);
                Err(error)
            }
        }
    }

    fn reject_spawn(&mut self, template: &str, error: &SpawnError) {
        match error {
            SpawnError::InsufficientEnergy { .. } | SpawnError::MatchNotActive(_) => {
                tracing::debug!(template, %error, "spawn rejected")
            }
            _ => tracing::warn!(template, %error, "spawn rejected"),
        }
        self.events.push(SimEvent::SpawnRejected {
            template: template.to_string(),
            error: error.clone(),
        });
    }

    // --- Match state machine ---

    /// Leave `Preparing`: lay out the lane and start the clock. From `Win`
    /// or `Lose` this resumes play without resetting anything.
    pub fn start_match(&mut self) -> Result<(), PhaseError> {
        if self.match_state.phase() == MatchPhase::Preparing {
            self.set_up_lane();
        }
        self.set_phase(MatchPhase::Playing)
    }

    pub fn declare_win(&mut self) -> Result<(), PhaseError> {
        self.set_phase(MatchPhase::Win)
    }

    pub fn declare_lose(&mut self) -> Result<(), PhaseError> {
        self.set_phase(MatchPhase::Lose)
    }

    pub fn end_match(&mut self) -> Result<(), PhaseError> {
        self.set_phase(MatchPhase::End)
    }

    fn set_phase(&mut self, to: MatchPhase) -> Result<(), PhaseError> {
        let from = self.match_state.transition(to)?;
        self.events.push(SimEvent::PhaseChanged { from, to });

        match to {
            MatchPhase::Playing if from == MatchPhase::Preparing => {
                let session_id = self.rng.gen::<u64>();
                self.session_id = Some(session_id);
                mirror("session_start", self.tracker.notify_session_start(session_id));
            }
            MatchPhase::Win | MatchPhase::Lose | MatchPhase::End => {
                systems::lifecycle::stand_down(&mut self.world, &mut self.despawn_buffer);
                systems::respawn::run(&mut self.world, &mut self.slots, to, &mut self.events);
                if !self.session_closed {
                    self.session_closed = true;
                    mirror("session_end", self.tracker.notify_session_end());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn set_up_lane(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.energy = ledger_for(&self.config);
        self.regen_clock = RegenClock::new(self.config.energy.regen_interval_secs);
        self.spawn_plan = SpawnPlan::from_config(&self.config.spawn_plan);
        self.time_limit_ticks = self.config.time_limit_secs.map(secs_to_ticks);
        self.slots.clear();

        if let Some(structure) = &self.config.structure {
            world_setup::spawn_structure(&mut self.world, structure);
        }

        for (index, slot_config) in self.config.defender_slots.iter().enumerate() {
            let Some(template) = self.roster.get(&slot_config.template) else {
                tracing::error!(index, template = %slot_config.template, "slot template missing, slot skipped");
                continue;
            };
            if template.kind != UnitKind::Defender {
                tracing::error!(index, template = %template.name, "slot template is not a defender, slot skipped");
                continue;
            }
            if let Err(error) = template.validate() {
                tracing::error!(index, %error, "slot template invalid, slot skipped");
                continue;
            }

            let home = DVec2::new(slot_config.x, slot_config.y);
            let unit_id = UnitId(self.next_unit_id);
            self.next_unit_id += 1;
            let unit = world_setup::spawn_unit(&mut self.world, &template, unit_id, home);
            self.events.push(SimEvent::UnitSpawned {
                unit: unit_id,
                kind: template.kind,
                template: template.name.clone(),
            });
            self.slots.push(DefenderSlot {
                index,
                slot: RespawnSlot::new(self.config.respawn_cooldown_secs),
                unit,
                unit_id,
                template,
                home,
            });
        }

        tracing::info!(
            slots = self.slots.len(),
            structure = self.config.structure.is_some(),
            planned_spawns = self.spawn_plan.remaining(),
            "lane set up"
        );
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let phase_result = match command {
            PlayerCommand::StartMatch => self.start_match(),
            PlayerCommand::DeclareWin => self.declare_win(),
            PlayerCommand::DeclareLose => self.declare_lose(),
            PlayerCommand::EndMatch => self.end_match(),
            PlayerCommand::SpawnUnit { template, x, y } => {
                let _ = self.try_spawn(&template, DVec2::new(x, y));
                Ok(())
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = sanitize_time_scale(scale);
                Ok(())
            }
        };

        if let Err(error) = phase_result {
            tracing::warn!(%error, "phase command ignored");
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();
        let tick = self.time.tick;
        let phase = self.match_state.phase();

        // 1. Scripted spawns
        let due = systems::spawn_plan::run(
            &mut self.spawn_plan,
            &mut self.rng,
            &self.config.lanes,
            tick,
        );
        for spawn in due {
            let position = DVec2::new(self.config.attacker_spawn_x, spawn.lane_y);
            let _ = self.try_spawn(&spawn.template, position);
        }
        // 2. Sensor casts
        systems::sensing::run(&mut self.world, &mut self.probe_scratch);
        // 3. State transitions from this tick's sensor results
        systems::unit_ai::run(&mut self.world, phase, tick);
        // 4. Damage: projectile hits, structure contact, attack cadence
        systems::projectiles::run(&mut self.world, &mut self.events);
        let structure_destroyed = systems::structure::run(&mut self.world, &mut self.events);
        systems::combat::run(&mut self.world, dt, tick, &mut self.events);
        // 5. Movement
        systems::movement::steer(&mut self.world);
        systems::movement::run(&mut self.world, dt);
        // 6. Knock-outs and lane bounds
        systems::lifecycle::run(&mut self.world, &self.config.attacker_bounds, &mut self.events);
        // 7. Respawn slots
        systems::respawn::run(&mut self.world, &mut self.slots, phase, &mut self.events);
        // 8. Deferred despawns and stray projectiles
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &self.config.projectile_bounds,
        );
        // 9. Energy regeneration
        if self.regen_clock.tick() {
            self.energy.regenerate();
        }
        // 10. Match result
        if structure_destroyed {
            if let Err(error) = self.set_phase(MatchPhase::Win) {
                tracing::warn!(%error, "could not record win");
            }
        } else if self.time_limit_ticks == Some(tick + 1) {
            tracing::info!(tick, "time limit reached");
            if let Err(error) = self.set_phase(MatchPhase::Lose) {
                tracing::warn!(%error, "could not record loss");
            }
        }
    }

    /// Mirror this tick's landed attacks to the session tracker.
    fn mirror_attacks(&mut self) {
        for event in &self.events {
            let attacker = match event {
                SimEvent::AttackLanded { attacker, .. } => *attacker,
                SimEvent::StructureHit { attacker, .. } => *attacker,
                _ => continue,
            };
            mirror("attack", self.tracker.notify_attack(attacker));
        }
    }
}

fn ledger_for(config: &MatchConfig) -> EnergyLedger {
    let energy = &config.energy;
    EnergyLedger::new(
        energy.max,
        energy.initial.unwrap_or(energy.max),
        energy.regen_per_tick,
    )
}

fn sanitize_time_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(0.0, 4.0)
    } else {
        1.0
    }
}
