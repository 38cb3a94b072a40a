//! Rigid body descriptions

use glam::Vec3;
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Handle to a rigid body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RigidBodyHandle(pub(crate) rapier::RigidBodyHandle);

/// Type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RigidBodyType {
    /// Level geometry - never moves
    Static,
    /// Fully simulated, driven by velocity commands
    #[default]
    Dynamic,
}

impl From<RigidBodyType> for rapier::RigidBodyType {
    fn from(t: RigidBodyType) -> Self {
        match t {
            RigidBodyType::Static => rapier::RigidBodyType::Fixed,
            RigidBodyType::Dynamic => rapier::RigidBodyType::Dynamic,
        }
    }
}

/// Description for creating a rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyDesc {
    pub body_type: RigidBodyType,
    pub position: Vec3,
    pub linear_velocity: Vec3,
    /// Gravity scale (0 = no gravity, 1 = normal)
    pub gravity_scale: f32,
    pub linear_damping: f32,
    /// Keep the body upright; characters turn visually, never physically
    pub lock_rotation: bool,
    pub ccd_enabled: bool,
    pub can_sleep: bool,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Vec3::ZERO,
            linear_velocity: Vec3::ZERO,
            gravity_scale: 1.0,
            linear_damping: 0.0,
            lock_rotation: false,
            ccd_enabled: false,
            can_sleep: true,
        }
    }
}

impl RigidBodyDesc {
    /// Create a static body description
    pub fn fixed() -> Self {
        Self {
            body_type: RigidBodyType::Static,
            ..Default::default()
        }
    }

    /// Upright dynamic body that never sleeps, for player and enemies
    pub fn character() -> Self {
        Self {
            lock_rotation: true,
            ccd_enabled: true,
            can_sleep: false,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub(crate) fn to_rapier_builder(&self) -> rapier::RigidBodyBuilder {
        let mut builder = rapier::RigidBodyBuilder::new(self.body_type.into())
            .translation(rapier::Vector::new(
                self.position.x,
                self.position.y,
                self.position.z,
            ))
            .linvel(rapier::Vector::new(
                self.linear_velocity.x,
                self.linear_velocity.y,
                self.linear_velocity.z,
            ))
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .ccd_enabled(self.ccd_enabled)
            .can_sleep(self.can_sleep);

        if self.lock_rotation {
            builder = builder.locked_axes(rapier::LockedAxes::ROTATION_LOCKED);
        }

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_desc_is_upright_and_awake() {
        let desc = RigidBodyDesc::character().with_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(desc.body_type, RigidBodyType::Dynamic);
        assert!(desc.lock_rotation);
        assert!(!desc.can_sleep);
        assert_eq!(desc.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
