//! Match phase machine.
//!
//! Preparing -> Playing -> {Win, Lose}; Win and Lose may return to Playing;
//! any phase may move to End, which is terminal.

use bastion_core::enums::MatchPhase;
use bastion_core::error::PhaseError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchState {
    phase: MatchPhase,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Whether the simulation advances this tick.
    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    pub fn can_transition(from: MatchPhase, to: MatchPhase) -> bool {
        use MatchPhase::*;
        match (from, to) {
            (End, _) => false,
            (_, End) => true,
            (Preparing, Playing) => true,
            (Playing, Win) | (Playing, Lose) => true,
            (Win, Playing) | (Lose, Playing) => true,
            _ => false,
        }
    }

    /// Move to `to`, returning the phase left behind.
    pub fn transition(&mut self, to: MatchPhase) -> Result<MatchPhase, PhaseError> {
        let from = self.phase;
        if !Self::can_transition(from, to) {
            return Err(PhaseError { from, to });
        }
        self.phase = to;
        tracing::info!(?from, ?to, "match phase changed");
        Ok(from)
    }
}
