//! Spawn controller: energy-gated unit creation.

use std::sync::Arc;

use glam::DVec2;
use hecs::{Entity, World};

use bastion_core::enums::UnitKind;
use bastion_core::error::SpawnError;
use bastion_core::templates::UnitTemplate;
use bastion_core::types::UnitId;

use crate::energy::EnergyLedger;
use crate::world_setup;

/// Create an attacker from `template` at `position` if the ledger can pay for it.
///
/// Defenders are placed by their respawn slots and are refused here.
///
/// Everything that can fail is checked before the debit; after it, creating
/// the entity cannot fail, so a spend never happens without a unit. On error
/// neither the world nor the ledger has changed.
pub fn try_spawn(
    world: &mut World,
    energy: &mut EnergyLedger,
    template: &Arc<UnitTemplate>,
    id: UnitId,
    position: DVec2,
) -> Result<Entity, SpawnError> {
    template.validate()?;
    if template.kind != UnitKind::Attacker {
        return Err(SpawnError::DefenderTemplate(template.name.clone()));
    }
    if !position.is_finite() {
        return Err(SpawnError::InvalidPosition {
            x: position.x,
            y: position.y,
        });
    }

    let remaining = energy.try_spend(template.spawn_energy_cost)?;
    let entity = world_setup::spawn_unit(world, template, id, position);

    tracing::debug!(
        unit_id = %id,
        template = %template.name,
        cost = template.spawn_energy_cost,
        remaining,
        "unit spawned"
    );
    Ok(entity)
}
