//! A placed trigger and its overlap bookkeeping

use crate::events::TriggerEvent;
use crate::filter::TriggerFilter;
use crate::system::TriggerId;
use crate::volume::TriggerVolume;
use glam::Vec3;
use skulk_core::{EntityId, LayerMask};
use std::collections::HashSet;

/// A static trigger volume placed in the level
#[derive(Debug, Clone)]
pub struct Trigger {
    pub volume: TriggerVolume,
    /// World-space center
    pub position: Vec3,
    pub filter: TriggerFilter,
    pub enabled: bool,
    overlapping: HashSet<EntityId>,
}

impl Trigger {
    pub fn new(volume: TriggerVolume, position: Vec3) -> Self {
        Self {
            volume,
            position,
            filter: TriggerFilter::new(),
            enabled: true,
            overlapping: HashSet::new(),
        }
    }

    pub fn with_filter(mut self, filter: TriggerFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Whether `entity` is currently overlapping
    pub fn is_inside(&self, entity: EntityId) -> bool {
        self.overlapping.contains(&entity)
    }

    pub fn overlapping(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.overlapping.iter().copied()
    }

    /// Test an occupant's bounds against the volume
    pub fn overlaps(&self, center: Vec3, half_extents: Vec3) -> bool {
        self.volume.overlaps_aabb(center - self.position, half_extents)
    }

    /// Record this frame's overlap state, returning the transition if any
    pub(crate) fn process_overlap(
        &mut self,
        id: TriggerId,
        entity: EntityId,
        layers: LayerMask,
        is_overlapping: bool,
    ) -> Option<TriggerEvent> {
        let was_inside = self.overlapping.contains(&entity);
        let now_inside = is_overlapping && self.enabled && self.filter.accepts(entity, layers);

        match (was_inside, now_inside) {
            (false, true) => {
                self.overlapping.insert(entity);
                Some(TriggerEvent::enter(id, entity))
            }
            (true, false) => {
                self.overlapping.remove(&entity);
                Some(TriggerEvent::exit(id, entity))
            }
            _ => None,
        }
    }

    /// Drop an occupant that no longer exists
    pub(crate) fn forget(&mut self, id: TriggerId, entity: EntityId) -> Option<TriggerEvent> {
        self.overlapping
            .remove(&entity)
            .then(|| TriggerEvent::exit(id, entity))
    }
}
