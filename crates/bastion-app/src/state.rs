//! State shared between the runner and the game loop thread.

use std::sync::{Arc, Mutex};

use bastion_core::commands::PlayerCommand;
use bastion_core::state::MatchSnapshot;

/// Messages sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, overwritten by the loop thread every tick and polled
/// by the runner for progress reports.
#[derive(Default)]
pub struct AppState {
    pub latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<MatchSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.latest().is_none());
    }

    #[test]
    fn test_latest_sees_shared_writes() {
        let state = AppState::new();
        let shared = state.latest_snapshot.clone();
        *shared.lock().unwrap() = Some(MatchSnapshot::default());
        assert!(state.latest().is_some());
    }
}
