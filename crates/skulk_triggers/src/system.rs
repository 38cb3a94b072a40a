//! Trigger system for processing overlaps

use crate::events::TriggerEvent;
use crate::trigger::Trigger;
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};
use skulk_core::{EntityId, LayerMask};
use std::collections::HashSet;

/// Index of a registered trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerId(pub u32);

/// Something that can set off triggers this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerOccupant {
    pub entity: EntityId,
    /// World-space center of the occupant's bounds
    pub center: Vec3,
    pub half_extents: Vec3,
    pub layers: LayerMask,
}

impl TriggerOccupant {
    pub fn new(entity: EntityId, center: Vec3, half_extents: Vec3, layers: LayerMask) -> Self {
        Self {
            entity,
            center,
            half_extents,
            layers,
        }
    }
}

/// The trigger system that processes all triggers
#[derive(Debug, Default)]
pub struct TriggerSystem {
    triggers: Vec<Trigger>,
    /// Collected events from the last update
    last_events: Vec<TriggerEvent>,
}

impl TriggerSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger
    pub fn register(&mut self, trigger: Trigger) -> TriggerId {
        let id = TriggerId(self.triggers.len() as u32);
        self.triggers.push(trigger);
        id
    }

    pub fn get(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.get(id.0 as usize)
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Test every occupant against every trigger and queue the transitions.
    ///
    /// Occupants missing from `occupants` that were inside a trigger get an
    /// exit event.
    pub fn update(&mut self, occupants: &[TriggerOccupant]) {
        self.last_events.clear();
        let present: HashSet<EntityId> = occupants.iter().map(|o| o.entity).collect();

        for (index, trigger) in self.triggers.iter_mut().enumerate() {
            let id = TriggerId(index as u32);

            for occupant in occupants {
                let overlapping = trigger.overlaps(occupant.center, occupant.half_extents);
                if let Some(event) =
                    trigger.process_overlap(id, occupant.entity, occupant.layers, overlapping)
                {
                    debug!("{:?} {:?} {}", id, event.event_type, occupant.entity);
                    self.last_events.push(event);
                }
            }

            let departed: Vec<EntityId> = trigger
                .overlapping()
                .filter(|e| !present.contains(e))
                .collect();
            for entity in departed {
                self.last_events.extend(trigger.forget(id, entity));
            }
        }
    }

    /// Get events from the last update
    pub fn events(&self) -> &[TriggerEvent] {
        &self.last_events
    }

    /// Drain events from the last update
    pub fn drain_events(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut self.last_events)
    }

    /// All triggers containing the occupant's bounds
    pub fn query(&self, center: Vec3, half_extents: Vec3) -> Vec<TriggerId> {
        self.triggers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.overlaps(center, half_extents))
            .map(|(i, _)| TriggerId(i as u32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TriggerFilter;
    use crate::volume::TriggerVolume;

    fn occupant(x: f32) -> TriggerOccupant {
        TriggerOccupant::new(
            EntityId::new(7),
            Vec3::new(x, 0.8, 0.0),
            Vec3::new(0.3, 0.8, 0.3),
            LayerMask::PLAYER,
        )
    }

    fn system() -> (TriggerSystem, TriggerId) {
        let mut system = TriggerSystem::new();
        let id = system.register(
            Trigger::new(TriggerVolume::box_shape(Vec3::new(2.0, 2.0, 2.0)), Vec3::new(0.0, 1.0, 0.0))
                .with_filter(TriggerFilter::layers(LayerMask::PLAYER)),
        );
        (system, id)
    }

    #[test]
    fn test_enter_and_exit_events() {
        let (mut system, id) = system();

        system.update(&[occupant(0.0)]);
        assert_eq!(system.events(), &[TriggerEvent::enter(id, EntityId::new(7))]);

        system.update(&[occupant(0.2)]);
        assert!(system.events().is_empty());

        system.update(&[occupant(5.0)]);
        assert_eq!(system.drain_events(), vec![TriggerEvent::exit(id, EntityId::new(7))]);
        assert!(system.events().is_empty());
    }

    #[test]
    fn test_missing_occupant_exits() {
        let (mut system, id) = system();
        system.update(&[occupant(0.0)]);
        system.update(&[]);
        assert_eq!(system.events(), &[TriggerEvent::exit(id, EntityId::new(7))]);
    }

    #[test]
    fn test_query_point() {
        let (mut system, id) = system();
        let far = system.register(Trigger::new(TriggerVolume::cuboid(Vec3::splat(1.0)), Vec3::new(10.0, 0.0, 0.0)));

        assert_eq!(system.query(Vec3::new(0.5, 1.0, 0.0), Vec3::ZERO), vec![id]);
        assert_eq!(system.query(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO), vec![far]);
        assert!(system.query(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO).is_empty());
    }
}
