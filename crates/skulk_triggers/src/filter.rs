//! Trigger filtering

use serde::{Deserialize, Serialize};
use skulk_core::{EntityId, LayerMask};
use std::collections::HashSet;

/// Filter for what occupants can activate a trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerFilter {
    /// Occupant must be on at least one of these layers
    pub required_layers: LayerMask,
    /// Specific entities that never trigger
    pub blocked_entities: HashSet<EntityId>,
}

impl TriggerFilter {
    /// Accept everything
    pub fn new() -> Self {
        Self {
            required_layers: LayerMask::ALL,
            blocked_entities: HashSet::new(),
        }
    }

    /// Accept only occupants on `layers`
    pub fn layers(layers: LayerMask) -> Self {
        Self {
            required_layers: layers,
            ..Self::new()
        }
    }

    /// Never accept `entity`, whatever its layers
    pub fn block(mut self, entity: EntityId) -> Self {
        self.blocked_entities.insert(entity);
        self
    }

    pub fn accepts(&self, entity: EntityId, layers: LayerMask) -> bool {
        self.required_layers.intersects(layers) && !self.blocked_entities.contains(&entity)
    }
}

impl Default for TriggerFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_filter() {
        let filter = TriggerFilter::layers(LayerMask::PLAYER);
        assert!(filter.accepts(EntityId::new(1), LayerMask::PLAYER));
        assert!(!filter.accepts(EntityId::new(2), LayerMask::ENEMIES));
    }

    #[test]
    fn test_blocked_entity() {
        let filter = TriggerFilter::new().block(EntityId::new(3));
        assert!(!filter.accepts(EntityId::new(3), LayerMask::PLAYER));
        assert!(filter.accepts(EntityId::new(4), LayerMask::PLAYER));
    }
}
