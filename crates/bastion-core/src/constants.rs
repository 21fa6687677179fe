//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Tolerance when comparing accumulated float timers against a period.
pub const TIMER_EPSILON: f64 = 1e-9;

// --- Energy ---

/// Default energy pool capacity.
pub const ENERGY_MAX: u32 = 10;

/// Energy restored per regeneration tick (one every `ENERGY_REGEN_INTERVAL_SECS`).
pub const ENERGY_REGEN_PER_TICK: u32 = 1;

/// Seconds between regeneration ticks.
pub const ENERGY_REGEN_INTERVAL_SECS: f64 = 1.0;

// --- Lane geometry ---

/// Attackers beyond these half extents are removed.
pub const ATTACKER_BOUNDS_X: f64 = 9.0;
pub const ATTACKER_BOUNDS_Y: f64 = 5.0;

/// Projectiles beyond these half extents are removed.
pub const PROJECTILE_BOUNDS_X: f64 = 20.0;
pub const PROJECTILE_BOUNDS_Y: f64 = 20.0;

/// Default lane centre lines (y), one unit apart.
pub const LANE_YS: [f64; 5] = [-2.0, -1.0, 0.0, 1.0, 2.0];

/// Where attackers enter the lane.
pub const ATTACKER_SPAWN_X: f64 = -8.0;

/// Where the default defender slots stand.
pub const DEFENDER_SLOT_X: f64 = 4.0;

/// Where the structure stands, across all lanes.
pub const STRUCTURE_X: f64 = 8.5;

/// Default collision radius of a unit body.
pub const UNIT_HIT_RADIUS: f64 = 0.4;

// --- Sensors ---

/// Maximum number of candidates a single sensor cast collects.
pub const SENSOR_BUFFER_SIZE: usize = 5;

/// Forward reach of the attacker (melee) probe.
pub const ATTACKER_SENSOR_LENGTH: f64 = 0.6;

/// Forward reach of the defender (ranged) probe.
pub const DEFENDER_SENSOR_LENGTH: f64 = 8.0;

// --- Lifecycle ---

/// Default cooldown before an emptied defender slot is refilled.
pub const RESPAWN_COOLDOWN_SECS: f64 = 10.0;

/// Delay between an attacker dying and its removal from the world.
pub const ATTACKER_DESPAWN_GRACE_SECS: f64 = 0.5;

/// Delay between a projectile landing and its removal from the world.
pub const PROJECTILE_DESPAWN_GRACE_SECS: f64 = 0.05;

/// Default projectile speed (lane units per second).
pub const PROJECTILE_SPEED: f64 = 5.0;

/// Collision radius of a projectile.
pub const PROJECTILE_HIT_RADIUS: f64 = 0.15;

// --- Structure ---

pub const STRUCTURE_MAX_HP: f64 = 10_000.0;
pub const STRUCTURE_SHIELD: f64 = 500.0;
pub const STRUCTURE_ATTACK: f64 = 9_999_999_999_999_999_999.0;
pub const STRUCTURE_HIT_RADIUS: f64 = 0.8;

/// Minimum damage dealt when neither side has attack nor shield.
pub const MIN_DAMAGE: f64 = 1.0;
