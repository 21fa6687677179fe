//! Scripted opponent spawns for headless runs.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::types::secs_to_ticks;

use crate::config::PlannedSpawnConfig;

/// A single scheduled spawn.
#[derive(Debug, Clone)]
pub struct PlannedSpawn {
    /// Playing tick at which this entry fires.
    pub spawn_at_tick: u64,
    pub template: String,
    /// Whether this entry has already fired.
    pub spawned: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SpawnPlan {
    pub entries: Vec<PlannedSpawn>,
}

/// A spawn that is due now, with its lane already chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct DueSpawn {
    pub template: String,
    pub lane_y: f64,
}

impl SpawnPlan {
    pub fn from_config(entries: &[PlannedSpawnConfig]) -> Self {
        let mut entries: Vec<PlannedSpawn> = entries
            .iter()
            .map(|e| PlannedSpawn {
                spawn_at_tick: secs_to_ticks(e.at_secs),
                template: e.template.clone(),
                spawned: false,
            })
            .collect();
        entries.sort_by_key(|e| e.spawn_at_tick);
        Self { entries }
    }

    pub fn remaining(&self) -> usize {
        self.entries.iter().filter(|e| !e.spawned).count()
    }
}

/// Mark every due entry as fired and pick a lane for each.
pub fn run(
    plan: &mut SpawnPlan,
    rng: &mut ChaCha8Rng,
    lanes: &[f64],
    current_tick: u64,
) -> Vec<DueSpawn> {
    let mut due = Vec::new();
    if lanes.is_empty() {
        return due;
    }
    for entry in &mut plan.entries {
        if !entry.spawned && current_tick >= entry.spawn_at_tick {
            let lane_y = lanes[rng.gen_range(0..lanes.len())];
            due.push(DueSpawn {
                template: entry.template.clone(),
                lane_y,
            });
            entry.spawned = true;
        }
    }
    due
}
