//! Respawn slot lifecycle for defender positions.
//!
//! Active (occupied) -> Cooling (empty, counting down) -> Active again once
//! the full cooldown has elapsed. A decided match ends the slot for good.
//! The cooldown is counted in whole ticks so it elapses exactly.

use bastion_core::constants::DT;
use bastion_core::enums::{MatchPhase, RespawnState};
use bastion_core::types::secs_to_ticks;

/// What the owner of a slot must do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    None,
    /// The occupant went down; hide it and start cooling.
    Vacated,
    /// Cooldown elapsed; set the occupant up again.
    Respawn,
    /// Match over; deactivate the occupant permanently.
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RespawnSlot {
    state: RespawnState,
    cooldown_ticks: u64,
    remaining_ticks: u64,
}

impl RespawnSlot {
    pub fn new(cooldown_secs: f64) -> Self {
        Self {
            state: RespawnState::Active,
            cooldown_ticks: secs_to_ticks(cooldown_secs),
            remaining_ticks: 0,
        }
    }

    pub fn state(&self) -> RespawnState {
        self.state
    }

    pub fn cooldown_remaining_secs(&self) -> f64 {
        self.remaining_ticks as f64 * DT
    }

    pub fn cooldown_secs(&self) -> f64 {
        self.cooldown_ticks as f64 * DT
    }

    /// Advance one tick.
    ///
    /// `occupant_down` is true when the slot's defender has been knocked out.
    pub fn step(&mut self, phase: MatchPhase, occupant_down: bool) -> SlotAction {
        if self.state == RespawnState::Ended {
            return SlotAction::None;
        }

        if phase.is_decided() || phase == MatchPhase::End {
            self.state = RespawnState::Ended;
            self.remaining_ticks = 0;
            return SlotAction::Ended;
        }

        if phase != MatchPhase::Playing {
            return SlotAction::None;
        }

        match self.state {
            RespawnState::Cooling => {
                self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
                if self.remaining_ticks == 0 {
                    self.state = RespawnState::Active;
                    SlotAction::Respawn
                } else {
                    SlotAction::None
                }
            }
            RespawnState::Active if occupant_down => {
                self.state = RespawnState::Cooling;
                self.remaining_ticks = self.cooldown_ticks;
                SlotAction::Vacated
            }
            _ => SlotAction::None,
        }
    }
}
