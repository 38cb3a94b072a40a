//! Cover zones
//!
//! Static box triggers. The player counts as in cover while overlapping at
//! least one zone, so leaving one of two overlapping zones keeps the flag.

use glam::Vec3;
use log::debug;
use skulk_core::{EntityId, LayerMask, WorldState};
use skulk_triggers::{Trigger, TriggerFilter, TriggerId, TriggerOccupant, TriggerSystem, TriggerVolume};

/// All cover zones of a level plus the player's overlap count
#[derive(Debug, Default)]
pub struct CoverZones {
    triggers: TriggerSystem,
    overlaps: usize,
}

impl CoverZones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a zone centered at `position` with full extents `size`
    pub fn add_zone(&mut self, position: Vec3, size: Vec3) -> TriggerId {
        let trigger = Trigger::new(TriggerVolume::box_shape(size), position)
            .with_filter(TriggerFilter::layers(LayerMask::PLAYER));
        self.triggers.register(trigger)
    }

    pub fn zone_count(&self) -> usize {
        self.triggers.trigger_count()
    }

    /// Number of zones the player currently overlaps
    pub fn overlaps(&self) -> usize {
        self.overlaps
    }

    pub fn is_in_cover(&self) -> bool {
        self.overlaps > 0
    }

    /// Feed the player's bounds and publish the cover flag
    pub fn update(&mut self, player: EntityId, center: Vec3, half_extents: Vec3, world: &mut WorldState) {
        let occupant = TriggerOccupant::new(player, center, half_extents, LayerMask::PLAYER);
        self.triggers.update(&[occupant]);

        for event in self.triggers.drain_events() {
            if event.other != player {
                continue;
            }
            if event.is_enter() {
                self.overlaps += 1;
            } else {
                self.overlaps = self.overlaps.saturating_sub(1);
            }
            debug!("{:?} {:?}, overlapping {}", event.trigger, event.event_type, self.overlaps);
        }

        world.set_in_cover(self.is_in_cover());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: Vec3 = Vec3::new(0.35, 0.85, 0.35);

    fn zones() -> CoverZones {
        let mut zones = CoverZones::new();
        zones.add_zone(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        zones.add_zone(Vec3::new(1.5, 1.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        zones
    }

    #[test]
    fn test_enter_and_leave() {
        let player = EntityId::new(1);
        let mut world = WorldState::new();
        let mut zones = zones();

        zones.update(player, Vec3::new(-0.5, 0.85, 0.0), HALF, &mut world);
        assert!(world.is_in_cover());

        zones.update(player, Vec3::new(-6.0, 0.85, 0.0), HALF, &mut world);
        assert!(!world.is_in_cover());
        assert_eq!(zones.overlaps(), 0);
    }

    #[test]
    fn test_overlapping_zones_count() {
        let player = EntityId::new(1);
        let mut world = WorldState::new();
        let mut zones = zones();

        // inside both
        zones.update(player, Vec3::new(0.75, 0.85, 0.0), HALF, &mut world);
        assert_eq!(zones.overlaps(), 2);

        // leave the first, still inside the second
        zones.update(player, Vec3::new(2.0, 0.85, 0.0), HALF, &mut world);
        assert_eq!(zones.overlaps(), 1);
        assert!(world.is_in_cover());

        zones.update(player, Vec3::new(9.0, 0.85, 0.0), HALF, &mut world);
        assert!(!world.is_in_cover());
    }
}
