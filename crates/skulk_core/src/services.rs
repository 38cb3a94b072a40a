//! Collaborator contracts
//!
//! The simulation never integrates bodies, casts rays or blends clips itself.
//! It calls into these traits once per step and treats every call as
//! synchronous.

use crate::error::Result;
use crate::id::EntityId;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Collision layer bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const PLAYER: Self = Self(1 << 0);
    pub const ENEMIES: Self = Self(1 << 1);
    pub const ENVIRONMENT: Self = Self(1 << 2);
    pub const COVER: Self = Self(1 << 3);
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl core::ops::BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Which colliders a ray may hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayFilter {
    /// Layers the ray collides with
    pub layers: LayerMask,
    /// Skip colliders attached to dynamic bodies
    pub exclude_dynamic: bool,
    /// Skip every collider owned by this entity
    pub exclude: Option<EntityId>,
}

impl RayFilter {
    /// Vision rays: level geometry only, never moving actors or the caster
    pub fn vision(caster: EntityId) -> Self {
        Self {
            layers: LayerMask::ENVIRONMENT,
            exclude_dynamic: true,
            exclude: Some(caster),
        }
    }

    /// Ground probe: anything static below the body except the body itself
    pub fn ground(body: EntityId) -> Self {
        Self {
            layers: LayerMask::ENVIRONMENT,
            exclude_dynamic: false,
            exclude: Some(body),
        }
    }

    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }
}

impl Default for RayFilter {
    fn default() -> Self {
        Self {
            layers: LayerMask::ALL,
            exclude_dynamic: false,
            exclude: None,
        }
    }
}

/// A single ray cast request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayQuery {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    pub max_distance: f32,
    /// Whether a ray starting inside a shape hits it at distance zero
    pub solid: bool,
    pub filter: RayFilter,
}

impl RayQuery {
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32, filter: RayFilter) -> Self {
        Self {
            origin,
            direction,
            max_distance,
            solid: true,
            filter,
        }
    }
}

/// Nearest hit along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    /// Entity owning the hit collider, if any
    pub entity: Option<EntityId>,
}

/// Synchronous ray casting against the physics world
pub trait Raycaster {
    fn cast(&self, query: &RayQuery) -> Option<RayHit>;
}

/// Capsule dimensions for a character collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleShape {
    pub half_height: f32,
    pub radius: f32,
    /// Collider offset above the body origin
    pub offset_y: f32,
}

impl CapsuleShape {
    pub const fn new(half_height: f32, radius: f32, offset_y: f32) -> Self {
        Self {
            half_height,
            radius,
            offset_y,
        }
    }

    /// Height of the capsule's lowest point above the body origin
    pub fn base_y(&self) -> f32 {
        self.offset_y - self.half_height - self.radius
    }
}

/// Per-entity rigid body access
///
/// Movement goes through velocity commands. `set_position` is reserved for
/// teleport recovery.
pub trait RigidBodies {
    fn position(&self, entity: EntityId) -> Result<Vec3>;
    fn set_position(&mut self, entity: EntityId, position: Vec3) -> Result<()>;
    fn linear_velocity(&self, entity: EntityId) -> Result<Vec3>;
    fn set_linear_velocity(&mut self, entity: EntityId, velocity: Vec3) -> Result<()>;
    /// Replace the entity's character capsule
    fn set_capsule(&mut self, entity: EntityId, shape: CapsuleShape) -> Result<()>;
}

/// How a clip plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackMode {
    Loop,
    Once,
}

/// Clip playback request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    pub mode: PlaybackMode,
    /// Cross-fade duration in seconds
    pub fade: f32,
    /// Normalized start time in `[0, 1]`
    pub start_at: f32,
    /// Hold the final pose once a one-shot finishes
    pub clamp_when_finished: bool,
}

impl PlaybackSettings {
    pub fn looping(fade: f32) -> Self {
        Self {
            mode: PlaybackMode::Loop,
            fade,
            start_at: 0.0,
            clamp_when_finished: false,
        }
    }

    pub fn once(fade: f32, start_at: f32) -> Self {
        Self {
            mode: PlaybackMode::Once,
            fade,
            start_at: start_at.clamp(0.0, 1.0),
            clamp_when_finished: true,
        }
    }
}

/// Named clip playback per entity
pub trait AnimationPlayer {
    fn has_clip(&self, entity: EntityId, clip: &str) -> bool;
    fn play(&mut self, entity: EntityId, clip: &str, settings: PlaybackSettings) -> Result<()>;
    fn stop(&mut self, entity: EntityId, clip: &str, fade: f32) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_ops() {
        let mask = LayerMask::PLAYER | LayerMask::ENEMIES;
        assert!(mask.contains(LayerMask::PLAYER));
        assert!(mask.intersects(LayerMask::ENEMIES));
        assert!(!mask.intersects(LayerMask::ENVIRONMENT));
    }

    #[test]
    fn test_vision_filter_excludes_caster_and_dynamic() {
        let caster = EntityId::new(3);
        let filter = RayFilter::vision(caster);
        assert_eq!(filter.exclude, Some(caster));
        assert!(filter.exclude_dynamic);
        assert_eq!(filter.layers, LayerMask::ENVIRONMENT);
    }

    #[test]
    fn test_once_settings_clamp_offset() {
        let settings = PlaybackSettings::once(0.2, 1.5);
        assert_eq!(settings.mode, PlaybackMode::Once);
        assert_eq!(settings.start_at, 1.0);
        assert!(settings.clamp_when_finished);
    }

    #[test]
    fn test_capsule_base() {
        let shape = CapsuleShape::new(0.5, 0.3, 0.8);
        assert!((shape.base_y() - 0.0).abs() < 1e-6);
    }
}
