//! Collider descriptions

use crate::layers::{CollisionGroups, CollisionLayer};
use glam::Vec3;
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};
use skulk_core::CapsuleShape;

/// Handle to a collider in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub(crate) rapier::ColliderHandle);

/// Collision shape type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Box with half-extents
    Box { half_extents: Vec3 },
    /// Capsule aligned along Y axis
    CapsuleY { half_height: f32, radius: f32 },
}

impl ColliderShape {
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box { half_extents }
    }

    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self::CapsuleY { half_height, radius }
    }

    /// Build a Rapier shared shape
    pub(crate) fn to_rapier(&self) -> rapier::SharedShape {
        match *self {
            Self::Box { half_extents } => {
                rapier::SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            Self::CapsuleY { half_height, radius } => {
                rapier::SharedShape::capsule_y(half_height, radius)
            }
        }
    }
}

impl From<CapsuleShape> for ColliderShape {
    fn from(capsule: CapsuleShape) -> Self {
        Self::capsule(capsule.half_height, capsule.radius)
    }
}

/// Description for creating a collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderDesc {
    pub shape: ColliderShape,
    /// Position offset from parent body
    pub offset: Vec3,
    pub friction: f32,
    pub density: f32,
    pub collision_groups: CollisionGroups,
    /// Entity id bits
    pub user_data: u128,
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::cuboid(Vec3::splat(0.5)),
            offset: Vec3::ZERO,
            friction: 0.5,
            density: 1.0,
            collision_groups: CollisionGroups::ALL,
            user_data: 0,
        }
    }
}

impl ColliderDesc {
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    /// Frictionless capsule so velocity-driven characters slide along walls
    pub fn character(capsule: CapsuleShape, layer: CollisionLayer) -> Self {
        Self {
            shape: capsule.into(),
            offset: Vec3::new(0.0, capsule.offset_y, 0.0),
            friction: 0.0,
            collision_groups: CollisionGroups::for_layer(layer),
            ..Default::default()
        }
    }

    /// Set collision groups from a layer
    pub fn with_layer(mut self, layer: CollisionLayer) -> Self {
        self.collision_groups = CollisionGroups::for_layer(layer);
        self
    }

    pub(crate) fn to_rapier_builder(&self) -> rapier::ColliderBuilder {
        rapier::ColliderBuilder::new(self.shape.to_rapier())
            .translation(rapier::Vector::new(self.offset.x, self.offset.y, self.offset.z))
            .friction(self.friction)
            .density(self.density)
            .collision_groups(rapier::InteractionGroups::new(
                rapier::Group::from_bits_truncate(self.collision_groups.memberships),
                rapier::Group::from_bits_truncate(self.collision_groups.filter),
            ))
            .user_data(self.user_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_collider_offsets_capsule() {
        let capsule = CapsuleShape::new(0.5, 0.3, 0.8);
        let desc = ColliderDesc::character(capsule, CollisionLayer::PLAYER);

        assert_eq!(desc.offset, Vec3::new(0.0, 0.8, 0.0));
        assert_eq!(desc.friction, 0.0);
        assert_eq!(
            desc.shape,
            ColliderShape::CapsuleY {
                half_height: 0.5,
                radius: 0.3
            }
        );
    }
}
