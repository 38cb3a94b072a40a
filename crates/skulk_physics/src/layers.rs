//! Collision layers and filtering

use serde::{Deserialize, Serialize};
use skulk_core::LayerMask;

/// A collision layer identifier (bit index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    /// The player character
    pub const PLAYER: Self = Self(0);
    /// Patrolling enemies
    pub const ENEMIES: Self = Self(1);
    /// Static level geometry; the only layer vision rays see
    pub const ENVIRONMENT: Self = Self(2);
    /// Cover props
    pub const COVER: Self = Self(3);

    /// Get the layer as a bitmask
    pub const fn as_mask(&self) -> u32 {
        1 << self.0
    }
}

impl From<CollisionLayer> for LayerMask {
    fn from(layer: CollisionLayer) -> Self {
        LayerMask(layer.as_mask())
    }
}

/// Collision groups for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGroups {
    /// Which groups this object belongs to (membership)
    pub memberships: u32,
    /// Which groups this object can collide with (filter)
    pub filter: u32,
}

impl CollisionGroups {
    pub const ALL: Self = Self {
        memberships: u32::MAX,
        filter: u32::MAX,
    };

    pub fn new(memberships: u32, filter: u32) -> Self {
        Self { memberships, filter }
    }

    /// Create from a single layer that collides with specific layers
    pub fn from_layer(layer: CollisionLayer, collides_with: &[CollisionLayer]) -> Self {
        let memberships = layer.as_mask();
        let filter = collides_with.iter().fold(0u32, |acc, l| acc | l.as_mask());
        Self { memberships, filter }
    }

    /// Default groups for a body on `layer`
    pub fn for_layer(layer: CollisionLayer) -> Self {
        use CollisionLayer as L;
        match layer {
            L::PLAYER => Self::from_layer(layer, &[L::ENEMIES, L::ENVIRONMENT, L::COVER]),
            L::ENEMIES => Self::from_layer(layer, &[L::PLAYER, L::ENEMIES, L::ENVIRONMENT, L::COVER]),
            L::ENVIRONMENT | L::COVER => {
                Self::from_layer(layer, &[L::PLAYER, L::ENEMIES, L::ENVIRONMENT, L::COVER])
            }
            _ => Self::new(layer.as_mask(), u32::MAX),
        }
    }

    /// Query groups for a ray that only sees `layers`
    pub fn query(layers: LayerMask) -> Self {
        Self {
            memberships: u32::MAX,
            filter: layers.bits(),
        }
    }

    /// Check if two groups can collide
    pub fn can_collide(&self, other: &CollisionGroups) -> bool {
        (self.memberships & other.filter) != 0 && (other.memberships & self.filter) != 0
    }
}

impl Default for CollisionGroups {
    fn default() -> Self {
        Self::ALL
    }
}
