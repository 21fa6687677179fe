//! Unit behaviour finite state machine.
//!
//! Pure functions that compute state transitions for one unit from this
//! tick's conditions. Transitions are level-triggered: the full context is
//! re-evaluated every tick, so a target lost between ticks can never leave a
//! unit stuck in `Attacking`.

use bastion_core::components::AttackTimer;
use bastion_core::constants::TIMER_EPSILON;
use bastion_core::enums::{MatchPhase, UnitKind, UnitState};

use crate::profiles::{get_profile, SensorSpec};

/// Input to the unit FSM for a single entity.
#[derive(Debug, Clone, Copy)]
pub struct UnitContext {
    pub kind: UnitKind,
    pub state: UnitState,
    pub current_hp: f64,
    pub phase: MatchPhase,
    /// Whether this tick's sensor cast found a valid opposing unit.
    pub has_target: bool,
}

/// Output from the unit FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitUpdate {
    pub new_state: UnitState,
    pub state_changed: bool,
}

impl UnitUpdate {
    fn stay(state: UnitState) -> Self {
        Self {
            new_state: state,
            state_changed: false,
        }
    }

    fn to(from: UnitState, to: UnitState) -> Self {
        Self {
            new_state: to,
            state_changed: from != to,
        }
    }
}

/// Kind-specific capabilities, dispatched on the `UnitKind` tag.
pub trait UnitBehavior {
    /// The probe this unit casts each tick.
    fn sense(&self) -> SensorSpec;
    /// The next state given this tick's conditions.
    fn transition(&self, ctx: &UnitContext) -> UnitUpdate;
    /// Advance the attack cadence by `dt`; true when an attack fires this tick.
    fn attack(&self, timer: &mut AttackTimer, attack_period: f64, dt: f64) -> bool;
}

impl UnitBehavior for UnitKind {
    fn sense(&self) -> SensorSpec {
        get_profile(*self).sensor
    }

    fn transition(&self, ctx: &UnitContext) -> UnitUpdate {
        evaluate(ctx)
    }

    fn attack(&self, timer: &mut AttackTimer, attack_period: f64, dt: f64) -> bool {
        advance_cadence(timer, attack_period, dt)
    }
}

/// Evaluate the FSM for one unit.
pub fn evaluate(ctx: &UnitContext) -> UnitUpdate {
    if ctx.state.is_terminal() {
        return UnitUpdate::stay(ctx.state);
    }

    // Match result freezes everyone, regardless of HP.
    if ctx.phase.is_decided() || ctx.phase == MatchPhase::End {
        return UnitUpdate::to(ctx.state, UnitState::Ended);
    }

    if ctx.state == UnitState::Disabled {
        // Only the respawn slot brings a disabled defender back.
        return UnitUpdate::stay(ctx.state);
    }

    if ctx.current_hp <= 0.0 {
        let profile = get_profile(ctx.kind);
        return UnitUpdate::to(ctx.state, profile.knocked_out_state);
    }

    if ctx.phase != MatchPhase::Playing {
        return UnitUpdate::stay(ctx.state);
    }

    if ctx.has_target {
        UnitUpdate::to(ctx.state, UnitState::Attacking)
    } else {
        UnitUpdate::to(ctx.state, UnitState::Moving)
    }
}

/// Accumulate `dt` and fire once the period has elapsed, resetting to zero.
///
/// The timer carries over between `Attacking` stints; entering the state
/// does not reset it.
pub fn advance_cadence(timer: &mut AttackTimer, attack_period: f64, dt: f64) -> bool {
    timer.elapsed_secs += dt.max(0.0);
    if timer.elapsed_secs + TIMER_EPSILON >= attack_period {
        timer.elapsed_secs = 0.0;
        true
    } else {
        false
    }
}

/// Whether a unit in `state` should be translating this tick.
pub fn is_moving(kind: UnitKind, state: UnitState) -> bool {
    state == UnitState::Moving && get_profile(kind).mobile
}
