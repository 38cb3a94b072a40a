//! Vision cone sampling
//!
//! Each step an enemy sweeps `ray_count + 1` horizontal rays evenly across
//! its field of view, both edges included, and records how far each ray
//! travels before level geometry stops it. The sample feeds the two-band
//! cone overlay. It never touches shared state.

use crate::steering::forward_from_yaw;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use skulk_core::{EntityId, LayerMask, RayFilter, RayQuery, Raycaster};

/// Shorter hits than this are treated as a ray starting inside geometry
const MIN_HIT_DISTANCE: f32 = 1e-3;

fn default_ray_count() -> u32 {
    24
}

fn default_fov_degrees() -> f32 {
    90.0
}

fn default_view_distance() -> f32 {
    12.0
}

fn default_red_zone_distance() -> f32 {
    7.0
}

fn default_eye_height() -> f32 {
    1.6
}

fn default_vertical_fov_degrees() -> f32 {
    45.0
}

fn default_height_threshold() -> f32 {
    1.5
}

fn default_los_tolerance() -> f32 {
    0.2
}

fn default_standing_target_height() -> f32 {
    1.4
}

fn default_crouching_target_height() -> f32 {
    0.7
}

fn default_vision_layers() -> LayerMask {
    LayerMask::ENVIRONMENT
}

/// Vision tuning for one enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Number of arc subdivisions; `ray_count + 1` rays are cast
    #[serde(default = "default_ray_count")]
    pub ray_count: u32,

    /// Full horizontal field of view
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f32,

    #[serde(default = "default_view_distance")]
    pub view_distance: f32,

    /// Inner high-alert radius, at most `view_distance`
    #[serde(default = "default_red_zone_distance")]
    pub red_zone_distance: f32,

    /// Ray origin height above the enemy's feet
    #[serde(default = "default_eye_height")]
    pub eye_height: f32,

    /// Maximum elevation angle to the player
    #[serde(default = "default_vertical_fov_degrees")]
    pub vertical_fov_degrees: f32,

    /// Height difference beyond which the red zone no longer applies
    #[serde(default = "default_height_threshold")]
    pub height_threshold: f32,

    /// Slack before an obstruction counts as blocking line of sight
    #[serde(default = "default_los_tolerance")]
    pub los_tolerance: f32,

    /// Line-of-sight target height above the player's feet when upright
    #[serde(default = "default_standing_target_height")]
    pub standing_target_height: f32,

    /// Line-of-sight target height above the player's feet when crouched
    #[serde(default = "default_crouching_target_height")]
    pub crouching_target_height: f32,

    /// Layers that block vision
    #[serde(default = "default_vision_layers")]
    pub vision_layers: LayerMask,

    /// Let the red zone expose a player crouched in cover
    #[serde(default)]
    pub red_zone_pierces_cover: bool,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            ray_count: default_ray_count(),
            fov_degrees: default_fov_degrees(),
            view_distance: default_view_distance(),
            red_zone_distance: default_red_zone_distance(),
            eye_height: default_eye_height(),
            vertical_fov_degrees: default_vertical_fov_degrees(),
            height_threshold: default_height_threshold(),
            los_tolerance: default_los_tolerance(),
            standing_target_height: default_standing_target_height(),
            crouching_target_height: default_crouching_target_height(),
            vision_layers: default_vision_layers(),
            red_zone_pierces_cover: false,
        }
    }
}

impl VisionConfig {
    pub fn half_fov_radians(&self) -> f32 {
        (self.fov_degrees * 0.5).to_radians()
    }

    /// Ray filter used by both the cone sweep and the line-of-sight ray
    pub fn ray_filter(&self, caster: EntityId) -> RayFilter {
        RayFilter::vision(caster).with_layers(self.vision_layers)
    }

    /// Line-of-sight target height for the player's posture
    pub fn target_height(&self, crouching: bool) -> f32 {
        if crouching {
            self.crouching_target_height
        } else {
            self.standing_target_height
        }
    }
}

/// One ray of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySample {
    /// Offset from the forward heading, radians
    pub angle: f32,
    /// Distance to the first obstruction, or the view distance
    pub distance: f32,
}

/// The latest sweep, overwritten in place each step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerceptionSample {
    rays: Vec<RaySample>,
}

impl PerceptionSample {
    pub fn rays(&self) -> &[RaySample] {
        &self.rays
    }

    pub fn len(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    /// Shortest unobstructed distance across the sweep
    pub fn nearest_obstruction(&self) -> Option<f32> {
        self.rays.iter().map(|r| r.distance).reduce(f32::min)
    }
}

/// Per-enemy vision sampler
#[derive(Debug, Clone)]
pub struct PerceptionField {
    config: VisionConfig,
    sample: PerceptionSample,
}

impl PerceptionField {
    pub fn new(config: VisionConfig) -> Self {
        let capacity = config.ray_count as usize + 1;
        Self {
            config,
            sample: PerceptionSample {
                rays: Vec::with_capacity(capacity),
            },
        }
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// The last sweep
    pub fn sample(&self) -> &PerceptionSample {
        &self.sample
    }

    /// Angle offsets of every ray, left edge to right edge
    pub fn angles(&self) -> impl Iterator<Item = f32> {
        let half = self.config.half_fov_radians();
        let count = self.config.ray_count.max(1);
        let step = 2.0 * half / count as f32;
        (0..=count).map(move |i| -half + step * i as f32)
    }

    /// Sweep the cone from `position` facing `yaw`
    pub fn sweep(
        &mut self,
        caster: EntityId,
        position: Vec3,
        yaw: f32,
        raycaster: &dyn Raycaster,
    ) -> &PerceptionSample {
        let origin = position + Vec3::new(0.0, self.config.eye_height, 0.0);
        let max = self.config.view_distance;
        let filter = self.config.ray_filter(caster);

        let mut rays = std::mem::take(&mut self.sample.rays);
        rays.clear();
        rays.extend(self.angles().map(|angle| {
            let query = RayQuery::new(origin, forward_from_yaw(yaw + angle), max, filter);
            let distance = match raycaster.cast(&query) {
                Some(hit) if hit.distance.is_finite() && hit.distance > MIN_HIT_DISTANCE => {
                    hit.distance.min(max)
                }
                _ => max,
            };
            RaySample { angle, distance }
        }));
        self.sample.rays = rays;

        &self.sample
    }
}

/// Cone overlay geometry built from one sweep.
///
/// The inner fan is clamped to the red zone; the outer band runs from that
/// edge to the raw hit distance. Both share the sweep's rays so the bands
/// always line up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisionOverlay {
    /// Fan apex at the eye, then one rim point per ray
    pub inner: Vec<Vec3>,
    /// Per ray: (inner edge, outer edge)
    pub outer: Vec<(Vec3, Vec3)>,
}

impl VisionOverlay {
    pub fn from_sample(sample: &PerceptionSample, eye: Vec3, yaw: f32, red_zone_distance: f32) -> Self {
        let mut inner = Vec::with_capacity(sample.len() + 1);
        let mut outer = Vec::with_capacity(sample.len());
        inner.push(eye);

        for ray in sample.rays() {
            let dir = forward_from_yaw(yaw + ray.angle);
            let near = eye + dir * ray.distance.min(red_zone_distance);
            let far = eye + dir * ray.distance;
            inner.push(near);
            outer.push((near, far));
        }

        Self { inner, outer }
    }
}
