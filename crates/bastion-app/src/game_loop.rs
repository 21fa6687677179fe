//! Game loop thread: runs the simulation engine at 50Hz and publishes snapshots.
//!
//! The engine is built by the runner and moved into this thread, which owns
//! it from then on. Commands arrive via `mpsc` channel; the latest snapshot
//! is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use bastion_core::constants::TICK_RATE;
use bastion_core::enums::MatchPhase;
use bastion_core::state::MatchSnapshot;
use bastion_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Stop after this many loop iterations.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to hold the tick rate.
    pub paced: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_ticks: None,
            paced: true,
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Shutdown,
    Disconnected,
    TickBudget,
    MatchOver(MatchPhase),
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle yielding the exit reason and
/// final snapshot.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
    options: LoopOptions,
) -> io::Result<(
    mpsc::Sender<GameLoopCommand>,
    JoinHandle<(LoopExit, MatchSnapshot)>,
)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("bastion-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, &latest_snapshot, options))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until shutdown, disconnect, tick budget or match end.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<MatchSnapshot>>,
    options: LoopOptions,
) -> (LoopExit, MatchSnapshot) {
    let mut next_tick_time = Instant::now();
    let mut ticks: u64 = 0;
    let mut saw_playing = false;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return (LoopExit::Shutdown, engine.snapshot()),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    return (LoopExit::Disconnected, engine.snapshot())
                }
            }
        }

        // 2. Advance one tick (the engine gates on match phase itself)
        let snapshot = engine.tick();
        ticks += 1;
        let phase = snapshot.phase;

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        saw_playing |= phase == MatchPhase::Playing;
        if saw_playing && phase != MatchPhase::Playing {
            tracing::info!(?phase, ticks, "match over");
            return (LoopExit::MatchOver(phase), engine.snapshot());
        }
        if options.max_ticks.is_some_and(|max| ticks >= max) {
            return (LoopExit::TickBudget, engine.snapshot());
        }

        if !options.paced {
            continue;
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::commands::PlayerCommand;
    use bastion_sim::config::{MatchConfig, SimConfig};

    fn unpaced(max_ticks: u64) -> LoopOptions {
        LoopOptions {
            max_ticks: Some(max_ticks),
            paced: false,
        }
    }

    #[test]
    fn test_tick_duration_constant() {
        // 50Hz = 20ms per tick
        assert_eq!(TICK_DURATION, Duration::from_millis(20));
    }

    #[test]
    fn test_loop_stops_on_tick_budget() {
        let engine = SimulationEngine::new(SimConfig::default());
        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartMatch))
            .unwrap();
        let latest = Mutex::new(None);

        let (exit, snapshot) = run_game_loop(engine, rx, &latest, unpaced(100));
        assert_eq!(exit, LoopExit::TickBudget);
        assert_eq!(snapshot.time.tick, 100);
        assert!(latest.lock().unwrap().is_some());
    }

    #[test]
    fn test_loop_stops_when_match_decided() {
        let mut config = MatchConfig::default();
        config.time_limit_secs = Some(0.5);
        let engine = SimulationEngine::with_match(SimConfig::default(), config).unwrap();
        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartMatch))
            .unwrap();
        let latest = Mutex::new(None);

        let (exit, snapshot) = run_game_loop(engine, rx, &latest, unpaced(1000));
        assert_eq!(exit, LoopExit::MatchOver(MatchPhase::Lose));
        assert_eq!(snapshot.phase, MatchPhase::Lose);
    }

    #[test]
    fn test_shutdown_command_stops_thread() {
        let engine = SimulationEngine::new(SimConfig::default());
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(engine, latest, LoopOptions::default()).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();
        let (exit, _) = handle.join().unwrap();
        assert_eq!(exit, LoopExit::Shutdown);
    }

    #[test]
    fn test_dropped_sender_disconnects() {
        let engine = SimulationEngine::new(SimConfig::default());
        let (tx, rx) = mpsc::channel();
        drop(tx);
        let latest = Mutex::new(None);
        let (exit, _) = run_game_loop(engine, rx, &latest, unpaced(10));
        assert_eq!(exit, LoopExit::Disconnected);
    }
}
