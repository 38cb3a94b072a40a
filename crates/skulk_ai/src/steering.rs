//! Steering helpers
//!
//! Yaw follows the convention `forward = (sin(yaw), 0, cos(yaw))`, i.e. yaw
//! zero faces +Z and rotation is about +Y.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Below this horizontal length a heading is treated as "no movement"
pub const MIN_HEADING: f32 = 1e-4;

/// Drop the vertical component
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw of a horizontal heading, `None` when the heading is negligible
pub fn yaw_from_direction(direction: Vec3) -> Option<f32> {
    let flat = horizontal(direction);
    if !flat.is_finite() || flat.length_squared() < MIN_HEADING * MIN_HEADING {
        return None;
    }
    Some(flat.x.atan2(flat.z))
}

/// Rotate `current` towards facing `direction` by fraction `t` (slerp)
pub fn face_towards(current: Quat, direction: Vec3, t: f32) -> Quat {
    match yaw_from_direction(direction) {
        Some(yaw) => current.slerp(Quat::from_rotation_y(yaw), t.clamp(0.0, 1.0)),
        None => current,
    }
}

/// Straight-line seek at constant speed on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seek {
    pub speed: f32,
}

impl Seek {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Velocity towards `target`, keeping the current vertical velocity so
    /// gravity still applies
    pub fn velocity(&self, position: Vec3, target: Vec3, current: Vec3) -> Vec3 {
        let heading = horizontal(target - position)
            .try_normalize()
            .unwrap_or(Vec3::ZERO);
        let planar = heading * self.speed;
        Vec3::new(planar.x, current.y, planar.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_yaw_round_trip() {
        let yaw = 0.7;
        let back = yaw_from_direction(forward_from_yaw(yaw)).unwrap();
        assert_relative_eq!(back, yaw, epsilon = 1e-5);
    }

    #[test]
    fn test_yaw_of_negative_x() {
        assert_relative_eq!(yaw_from_direction(Vec3::NEG_X).unwrap(), -FRAC_PI_2, epsilon = 1e-6);
        assert!(yaw_from_direction(Vec3::Y).is_none());
    }

    #[test]
    fn test_rotation_matches_forward() {
        let yaw = 1.1;
        let rotated = Quat::from_rotation_y(yaw) * Vec3::Z;
        assert!(rotated.abs_diff_eq(forward_from_yaw(yaw), 1e-5));
    }

    #[test]
    fn test_seek_keeps_vertical_velocity() {
        let seek = Seek::new(2.0);
        let v = seek.velocity(Vec3::ZERO, Vec3::new(3.0, 5.0, 4.0), Vec3::new(9.0, -1.5, 9.0));
        assert_relative_eq!(v.x, 1.2, epsilon = 1e-5);
        assert_relative_eq!(v.z, 1.6, epsilon = 1e-5);
        assert_relative_eq!(v.y, -1.5);
    }

    #[test]
    fn test_seek_at_target_stops() {
        let v = Seek::new(2.0).velocity(Vec3::ONE, Vec3::ONE, Vec3::ZERO);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_face_towards_interpolates() {
        let start = Quat::IDENTITY;
        let half = face_towards(start, Vec3::X, 0.5);
        let full = face_towards(start, Vec3::X, 1.0);

        assert!((full * Vec3::Z).abs_diff_eq(Vec3::X, 1e-5));
        let mid = half * Vec3::Z;
        assert!(mid.x > 0.0 && mid.z > 0.0);
        assert_eq!(face_towards(start, Vec3::ZERO, 1.0), start);
    }
}
