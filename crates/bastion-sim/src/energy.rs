//! Energy ledger: the regenerating pool that gates spawns.
//!
//! The engine owns the only ledger and mutates it from one thread, so a
//! spend and a regeneration can never interleave.

use bastion_core::error::SpawnError;
use bastion_core::state::EnergyView;
use bastion_core::types::secs_to_ticks;

/// Invariant: `0 <= current <= max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyLedger {
    current: u32,
    max: u32,
    regen_per_tick: u32,
}

impl EnergyLedger {
    pub fn new(max: u32, initial: u32, regen_per_tick: u32) -> Self {
        Self {
            current: initial.min(max),
            max,
            regen_per_tick,
        }
    }

    pub fn full(max: u32, regen_per_tick: u32) -> Self {
        Self::new(max, max, regen_per_tick)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.current
    }

    /// Debit `cost`. A no-op when the pool cannot cover it; callers check first.
    pub fn spend(&mut self, cost: u32) {
        if !self.can_afford(cost) {
            return;
        }
        self.current = self.current.saturating_sub(cost);
    }

    /// Check and debit in one step, returning the remaining balance.
    pub fn try_spend(&mut self, cost: u32) -> Result<u32, SpawnError> {
        if !self.can_afford(cost) {
            return Err(SpawnError::InsufficientEnergy {
                available: self.current,
                cost,
            });
        }
        self.current -= cost;
        Ok(self.current)
    }

    /// Restore one regeneration tick's worth, capped at `max`.
    pub fn regenerate(&mut self) {
        self.current = self
            .current
            .saturating_add(self.regen_per_tick)
            .min(self.max);
    }

    pub fn view(&self) -> EnergyView {
        EnergyView {
            current: self.current,
            max: self.max,
        }
    }
}

/// Fixed-interval trigger for regeneration, counted in simulation ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenClock {
    interval_ticks: u64,
    elapsed_ticks: u64,
}

impl RegenClock {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval_ticks: secs_to_ticks(interval_secs).max(1),
            elapsed_ticks: 0,
        }
    }

    /// Advance one tick; true when a regeneration is due.
    pub fn tick(&mut self) -> bool {
        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.interval_ticks {
            self.elapsed_ticks = 0;
            true
        } else {
            false
        }
    }
}
