//! Trigger volume shapes

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Trigger volume shapes, centered on the trigger position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerVolume {
    /// Axis-aligned box
    Box {
        /// Half-extents (width/2, height/2, depth/2)
        half_extents: Vec3,
    },
}

impl TriggerVolume {
    /// Create a box trigger volume from its full size
    pub fn box_shape(size: Vec3) -> Self {
        Self::Box {
            half_extents: size * 0.5,
        }
    }

    /// Create a box trigger volume from half-extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box { half_extents }
    }

    /// Check if a point, relative to the volume center, is inside
    pub fn contains_point(&self, point: Vec3) -> bool {
        match *self {
            Self::Box { half_extents } => point.abs().cmple(half_extents).all(),
        }
    }

    /// Check overlap with an axis-aligned box, relative to the volume center
    pub fn overlaps_aabb(&self, center: Vec3, half_extents: Vec3) -> bool {
        match *self {
            Self::Box { half_extents: own } => center.abs().cmple(own + half_extents).all(),
        }
    }

    /// Bounding half-extents
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            Self::Box { half_extents } => half_extents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_contains_point() {
        let volume = TriggerVolume::box_shape(Vec3::new(4.0, 2.0, 4.0));
        assert!(volume.contains_point(Vec3::new(1.9, 0.9, -1.9)));
        assert!(!volume.contains_point(Vec3::new(2.1, 0.0, 0.0)));
    }

    #[test]
    fn test_box_overlaps_touching_aabb() {
        let volume = TriggerVolume::cuboid(Vec3::splat(1.0));
        assert!(volume.overlaps_aabb(Vec3::new(1.25, 0.0, 0.0), Vec3::splat(0.3)));
        assert!(!volume.overlaps_aabb(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(0.3)));
    }
}
