//! Targeting sensor: a directional proximity probe cast once per tick.
//!
//! The spatial query sits behind `SpatialQuery` so the sensor runs the same
//! against the ECS world and against a hand-built fake in tests. Candidates
//! come back in query order, capped at `SENSOR_BUFFER_SIZE`; the sensor picks
//! the first one of the target faction, which is not necessarily the nearest.

use glam::DVec2;
use hecs::{Entity, World};

use bastion_core::components::{Collider, FactionTag, StructureStats, Unit, UnitStats};
use bastion_core::constants::SENSOR_BUFFER_SIZE;
use bastion_core::enums::Faction;
use bastion_core::types::Transform;
use bastion_combat::profiles::SensorSpec;

/// One candidate returned by a spatial query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit<H> {
    pub handle: H,
    pub faction: Faction,
    /// False for entities that are dead, disabled or otherwise gone.
    pub valid: bool,
}

/// A bounded ray query over whatever holds the entities.
pub trait SpatialQuery {
    type Handle: Copy + Eq;

    /// Push up to `max_hits` bodies touched by the segment
    /// `origin .. origin + direction * length` into `out`.
    fn probe(
        &self,
        origin: DVec2,
        direction: DVec2,
        length: f64,
        max_hits: usize,
        out: &mut Vec<ProbeHit<Self::Handle>>,
    );
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetingSensor<H = Entity> {
    spec: SensorSpec,
    hit: Option<H>,
}

impl<H: Copy + Eq> TargetingSensor<H> {
    pub fn new(spec: SensorSpec) -> Self {
        Self { spec, hit: None }
    }

    pub fn spec(&self) -> &SensorSpec {
        &self.spec
    }

    /// Probe from `origin` and keep the first valid target-faction hit.
    ///
    /// The stored hit is cleared before every cast, so a target removed
    /// since the last cast can never be reported again.
    pub fn cast<Q>(
        &mut self,
        query: &Q,
        origin: &Transform,
        own_handle: H,
        scratch: &mut Vec<ProbeHit<H>>,
    ) where
        Q: SpatialQuery<Handle = H>,
    {
        self.hit = None;
        scratch.clear();

        let direction = origin.to_world_direction(self.spec.direction);
        query.probe(
            origin.position,
            direction,
            self.spec.length,
            SENSOR_BUFFER_SIZE,
            scratch,
        );

        self.hit = scratch
            .iter()
            .take(SENSOR_BUFFER_SIZE)
            .filter(|h| h.handle != own_handle)
            .filter(|h| h.faction != self.spec.own_faction)
            .filter(|h| h.valid)
            .find(|h| h.faction == self.spec.target_faction)
            .map(|h| h.handle);
    }

    pub fn has_hit(&self) -> bool {
        self.hit.is_some()
    }

    pub fn hit_entity(&self) -> Option<H> {
        self.hit
    }

    pub fn clear(&mut self) {
        self.hit = None;
    }
}

/// Whether the segment from `origin` along unit `direction` for `length`
/// passes within `radius` of `center`.
pub fn segment_touches_circle(
    origin: DVec2,
    direction: DVec2,
    length: f64,
    center: DVec2,
    radius: f64,
) -> bool {
    let along = (center - origin).dot(direction).clamp(0.0, length.max(0.0));
    let closest = origin + direction * along;
    closest.distance_squared(center) <= radius * radius
}

/// `SpatialQuery` over the hecs world. Bodies are every entity carrying
/// a `Transform`, `FactionTag` and `Collider`. Knocked-out units and a
/// fallen structure have no active collider and never take a buffer slot.
pub struct WorldProbe<'w> {
    world: &'w World,
}

impl<'w> WorldProbe<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }
}

impl SpatialQuery for WorldProbe<'_> {
    type Handle = Entity;

    fn probe(
        &self,
        origin: DVec2,
        direction: DVec2,
        length: f64,
        max_hits: usize,
        out: &mut Vec<ProbeHit<Entity>>,
    ) {
        let direction = direction.try_normalize().unwrap_or(DVec2::X);
        let mut query = self.world.query::<(
            &Transform,
            &FactionTag,
            &Collider,
            Option<&Unit>,
            Option<&UnitStats>,
            Option<&StructureStats>,
        )>();

        for (entity, (transform, faction, collider, unit, stats, structure)) in query.iter() {
            if out.len() >= max_hits {
                break;
            }
            if !segment_touches_circle(
                origin,
                direction,
                length,
                transform.position,
                collider.radius,
            ) {
                continue;
            }

            let active = match (unit, stats, structure) {
                (Some(unit), Some(stats), _) => {
                    unit.state.is_targetable() && !stats.is_depleted()
                }
                (None, _, Some(structure)) => structure.current_hp > 0.0,
                _ => false,
            };
            if !active {
                continue;
            }

            out.push(ProbeHit {
                handle: entity,
                faction: faction.0,
                valid: true,
            });
        }
    }
}
