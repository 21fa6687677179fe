//! Match snapshot: the complete visible state handed to render/UI layers each tick.
//! Read-only; nothing outside the engine mutates simulation state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{SimTime, UnitId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub session_id: Option<u64>,
    pub energy: EnergyView,
    pub units: Vec<UnitView>,
    pub slots: Vec<SlotView>,
    pub structure: Option<StructureView>,
    pub projectiles: u32,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyView {
    pub current: u32,
    pub max: u32,
}

impl EnergyView {
    /// Fill ratio for an energy bar (0.0 - 1.0).
    pub fn fill(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub faction: Faction,
    pub state: UnitState,
    pub template: String,
    pub current_hp: f64,
    pub max_hp: f64,
    pub position: DVec2,
    pub facing: DVec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotView {
    pub index: usize,
    pub state: RespawnState,
    pub unit: Option<UnitId>,
    pub cooldown_remaining_secs: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StructureView {
    pub position: DVec2,
    pub current_hp: f64,
    pub max_hp: f64,
}
