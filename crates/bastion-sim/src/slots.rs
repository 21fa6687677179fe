//! Defender positions, each supervised by a respawn slot.

use std::sync::Arc;

use glam::DVec2;
use hecs::Entity;

use bastion_core::state::SlotView;
use bastion_core::templates::UnitTemplate;
use bastion_core::types::UnitId;
use bastion_combat::respawn::RespawnSlot;

#[derive(Debug, Clone)]
pub struct DefenderSlot {
    pub index: usize,
    pub slot: RespawnSlot,
    /// The defender this slot holds. Kept in the world while cooling.
    pub unit: Entity,
    pub unit_id: UnitId,
    pub template: Arc<UnitTemplate>,
    pub home: DVec2,
}

impl DefenderSlot {
    pub fn view(&self) -> SlotView {
        SlotView {
            index: self.index,
            state: self.slot.state(),
            unit: Some(self.unit_id),
            cooldown_remaining_secs: self.slot.cooldown_remaining_secs(),
        }
    }
}
