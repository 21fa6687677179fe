//! BASTION headless runner.
//!
//! The composition root: loads configuration, builds the engine with its
//! session tracker, runs the game loop thread and reports the outcome.

pub mod cli;
pub mod game_loop;
pub mod logging;
pub mod state;
pub mod tracker;

pub use bastion_core as core;

use std::path::Path;
use std::time::{Duration, Instant};

use thiserror::Error;

use bastion_core::commands::PlayerCommand;
use bastion_core::enums::{MatchPhase, UnitState};
use bastion_core::state::MatchSnapshot;
use bastion_sim::config::{ConfigError, MatchConfig, SimConfig};
use bastion_sim::SimulationEngine;

use crate::cli::Args;
use crate::game_loop::{LoopExit, LoopOptions};
use crate::state::AppState;
use crate::tracker::TrackerTally;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start thread: {0}")]
    Thread(#[from] std::io::Error),
    #[error("{0} thread panicked")]
    Panicked(&'static str),
    #[error("failed to write snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub exit: LoopExit,
    pub phase: MatchPhase,
    pub ticks: u64,
    pub energy: u32,
    pub live_units: usize,
    pub tracker: TrackerTally,
    pub snapshot: MatchSnapshot,
}

pub fn load_match_config(path: Option<&Path>) -> Result<MatchConfig, ConfigError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading match config");
            MatchConfig::from_file(path)
        }
        None => Ok(MatchConfig::default()),
    }
}

/// Run one match to completion or to the tick budget.
pub fn run(args: &Args) -> Result<RunSummary, AppError> {
    let match_config = load_match_config(args.config.as_deref())?;
    let sim_config = SimConfig {
        seed: args.seed,
        time_scale: args.time_scale,
    };

    let (tracker, tracker_handle) = tracker::spawn_tracker_thread()?;
    let mut engine =
        SimulationEngine::with_match(sim_config, match_config)?.with_tracker(tracker);
    engine.queue_command(PlayerCommand::StartMatch);

    let app = AppState::new();
    let options = LoopOptions {
        max_ticks: Some(args.ticks),
        paced: !args.unpaced,
    };
    let (tx, loop_handle) =
        game_loop::spawn_game_loop(engine, app.latest_snapshot.clone(), options)?;

    let mut last_report = Instant::now();
    while !loop_handle.is_finished() {
        std::thread::sleep(POLL_INTERVAL);
        if last_report.elapsed() >= PROGRESS_INTERVAL {
            if let Some(snap) = app.latest() {
                tracing::info!(
                    tick = snap.time.tick,
                    phase = ?snap.phase,
                    energy = snap.energy.current,
                    units = snap.units.len(),
                    "progress"
                );
            }
            last_report = Instant::now();
        }
    }

    let (exit, snapshot) = loop_handle
        .join()
        .map_err(|_| AppError::Panicked("game loop"))?;
    drop(tx);
    // The engine, and with it the tracker's sender, is dropped when the loop
    // thread returns, so the tracker thread drains and stops.
    let tally = tracker_handle
        .join()
        .map_err(|_| AppError::Panicked("tracker"))?;

    if let Some(path) = &args.snapshot_out {
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "final snapshot written");
    }

    let summary = RunSummary {
        exit,
        phase: snapshot.phase,
        ticks: snapshot.time.tick,
        energy: snapshot.energy.current,
        live_units: snapshot
            .units
            .iter()
            .filter(|u| u.state.is_targetable() || u.state == UnitState::Ended)
            .count(),
        tracker: tally,
        snapshot,
    };

    tracing::info!(
        exit = ?summary.exit,
        phase = ?summary.phase,
        ticks = summary.ticks,
        energy = summary.energy,
        live_units = summary.live_units,
        spawns_mirrored = summary.tracker.spawns,
        "run complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsStr;

    #[test]
    fn test_run_default_match_unpaced() {
        let args = Args::try_parse_from(["bastion-app", "--ticks", "120", "--unpaced"]).unwrap();
        let summary = run(&args).unwrap();
        assert_eq!(summary.exit, LoopExit::TickBudget);
        assert_eq!(summary.phase, MatchPhase::Playing);
        assert_eq!(summary.ticks, 120);
        assert_eq!(summary.live_units, 5);
        assert_eq!(summary.tracker.sessions, 1);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::try_parse_from([
            "bastion-app",
            "/nonexistent/bastion-match.json",
            "--unpaced",
        ])
        .unwrap();
        assert!(matches!(
            run(&args),
            Err(AppError::Config(ConfigError::Io(_)))
        ));
    }

    #[test]
    fn test_run_with_config_file_and_snapshot_out() {
        let dir = std::env::temp_dir().join(format!("bastion-app-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("match.json");
        let snapshot_path = dir.join("final.json");
        std::fs::write(
            &config_path,
            r#"{"time_limit_secs": 1.0, "spawn_plan": [{"at_secs": 0.0, "template": "slime"}]}"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            OsStr::new("bastion-app"),
            config_path.as_os_str(),
            OsStr::new("--unpaced"),
            OsStr::new("--snapshot-out"),
            snapshot_path.as_os_str(),
        ])
        .unwrap();
        let summary = run(&args).unwrap();

        assert_eq!(summary.exit, LoopExit::MatchOver(MatchPhase::Lose));
        assert_eq!(summary.tracker.spawns, 1);
        assert_eq!(summary.tracker.session_ends, 1);
        let written: MatchSnapshot =
            serde_json::from_str(&std::fs::read_to_string(&snapshot_path).unwrap()).unwrap();
        assert_eq!(written.phase, MatchPhase::Lose);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
