//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DT, TICK_RATE};

/// Position and facing of an entity in lane space.
/// x runs along the lane (attackers advance toward +x), y across lanes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec2,
    /// Unit vector the entity is facing. Local +x maps onto this.
    pub facing: DVec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            facing: DVec2::X,
        }
    }
}

impl Transform {
    pub fn new(position: DVec2, facing: DVec2) -> Self {
        Self {
            position,
            facing: facing.try_normalize().unwrap_or(DVec2::X),
        }
    }

    /// Rotate a local-space direction into world space.
    pub fn to_world_direction(&self, local: DVec2) -> DVec2 {
        self.facing.rotate(local)
    }
}

/// Linear velocity in lane units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: DVec2,
}

/// Axis-aligned movement limits centred on the origin.
/// `half_extents = (9, 5)` admits x in [-9, 9] and y in [-5, 5].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneBounds {
    pub half_extents: DVec2,
}

impl LaneBounds {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            half_extents: DVec2::new(x.abs(), y.abs()),
        }
    }

    pub fn contains(&self, position: DVec2) -> bool {
        position.x.abs() <= self.half_extents.x && position.y.abs() <= self.half_extents.y
    }
}

/// Stable identifier handed out to every unit, independent of ECS entity ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * DT;
    }
}

/// Convert a duration in seconds to whole ticks, rounding up.
pub fn secs_to_ticks(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    // Guard against 10.0 * 50 landing a hair above 500.
    let raw = secs * TICK_RATE as f64;
    (raw - 1e-9).ceil().max(0.0) as u64
}
