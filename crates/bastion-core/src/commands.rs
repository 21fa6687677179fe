//! Player commands sent from an input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Match control ---
    /// Leave Preparing and start the match.
    StartMatch,
    /// Record a win for the attacking player.
    DeclareWin,
    /// Record a loss for the attacking player.
    DeclareLose,
    /// Close the session. Terminal.
    EndMatch,

    // --- Placement ---
    /// Spawn a unit from a roster template at a world position.
    SpawnUnit { template: String, x: f64, y: f64 },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double). Only affects the runner's pacing.
    SetTimeScale { scale: f64 },
}
