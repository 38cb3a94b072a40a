//! Level configuration
//!
//! A level is a TOML document:
//!
//! ```toml
//! name = "warehouse"
//! floor_threshold = -10.0
//!
//! [player]
//! spawn = [0.0, 0.05, 0.0]
//! run_speed = 6.0
//!
//! [[enemies]]
//! spawn = [0.0, 0.05, 8.0]
//! waypoints = [[0.0, 0.0, 8.0], [6.0, 0.0, 8.0]]
//! vision = { view_distance = 12.0, red_zone_distance = 7.0 }
//!
//! [[cover_zones]]
//! position = [3.0, 1.0, 4.0]
//! size = [2.0, 2.0, 2.0]
//!
//! [[walls]]
//! center = [-3.0, 1.0, 4.0]
//! half_extents = [0.25, 1.0, 2.0]
//! ```
//!
//! Every field not shown falls back to its default.

use crate::error::{ConfigError, Result};
use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};
use skulk_ai::{PatrolConfig, VisionConfig};
use skulk_core::CapsuleShape;
use skulk_physics::PhysicsConfig;
use std::path::Path;

fn default_level_name() -> String {
    "untitled".to_string()
}

fn default_floor_threshold() -> f32 {
    -10.0
}

fn default_player_spawn() -> Vec3 {
    Vec3::new(0.0, 0.05, 0.0)
}

fn default_walk_speed() -> f32 {
    2.5
}

fn default_run_speed() -> f32 {
    6.0
}

fn default_air_speed() -> f32 {
    4.0
}

fn default_dash_speed() -> f32 {
    9.0
}

fn default_jump_velocity() -> f32 {
    5.0
}

fn default_dash_jump_velocity() -> f32 {
    7.0
}

fn default_jump_cooldown() -> f64 {
    0.5
}

fn default_ground_probe() -> f32 {
    0.2
}

fn default_player_turn_speed() -> f32 {
    12.0
}

fn default_standing_capsule() -> CapsuleShape {
    CapsuleShape::new(0.5, 0.35, 0.85)
}

fn default_crouching_capsule() -> CapsuleShape {
    CapsuleShape::new(0.2, 0.3, 0.5)
}

fn default_enemy_turn_speed() -> f32 {
    6.0
}

fn default_enemy_capsule() -> CapsuleShape {
    CapsuleShape::new(0.55, 0.35, 0.9)
}

fn default_floor() -> WallConfig {
    WallConfig {
        center: Vec3::new(0.0, -0.5, 0.0),
        half_extents: Vec3::new(50.0, 0.5, 50.0),
    }
}

/// Player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Feet position at spawn and after fall recovery
    #[serde(default = "default_player_spawn")]
    pub spawn: Vec3,

    /// Grounded, moving, crouched
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,

    /// Grounded, moving, upright
    #[serde(default = "default_run_speed")]
    pub run_speed: f32,

    /// Airborne, not dashing
    #[serde(default = "default_air_speed")]
    pub air_speed: f32,

    /// Airborne, moving, upright
    #[serde(default = "default_dash_speed")]
    pub dash_speed: f32,

    #[serde(default = "default_jump_velocity")]
    pub jump_velocity: f32,

    /// Jump impulse when leaving the ground while moving upright
    #[serde(default = "default_dash_jump_velocity")]
    pub dash_jump_velocity: f32,

    /// Seconds after a jump during which ground checks are suppressed
    #[serde(default = "default_jump_cooldown")]
    pub jump_cooldown: f64,

    /// Length of the downward ground probe
    #[serde(default = "default_ground_probe")]
    pub ground_probe: f32,

    /// Grounded facing interpolation rate, per second
    #[serde(default = "default_player_turn_speed")]
    pub turn_speed: f32,

    #[serde(default = "default_standing_capsule")]
    pub standing_capsule: CapsuleShape,

    #[serde(default = "default_crouching_capsule")]
    pub crouching_capsule: CapsuleShape,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: default_player_spawn(),
            walk_speed: default_walk_speed(),
            run_speed: default_run_speed(),
            air_speed: default_air_speed(),
            dash_speed: default_dash_speed(),
            jump_velocity: default_jump_velocity(),
            dash_jump_velocity: default_dash_jump_velocity(),
            jump_cooldown: default_jump_cooldown(),
            ground_probe: default_ground_probe(),
            turn_speed: default_player_turn_speed(),
            standing_capsule: default_standing_capsule(),
            crouching_capsule: default_crouching_capsule(),
        }
    }
}

/// One patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub spawn: Vec3,

    /// Cyclic patrol route; at least one point
    pub waypoints: Vec<Vec3>,

    #[serde(default)]
    pub vision: VisionConfig,

    #[serde(default)]
    pub patrol: PatrolConfig,

    /// Facing interpolation rate, per second
    #[serde(default = "default_enemy_turn_speed")]
    pub turn_speed: f32,

    #[serde(default = "default_enemy_capsule")]
    pub capsule: CapsuleShape,
}

impl EnemyConfig {
    pub fn new(spawn: Vec3, waypoints: Vec<Vec3>) -> Self {
        Self {
            spawn,
            waypoints,
            vision: VisionConfig::default(),
            patrol: PatrolConfig::default(),
            turn_speed: default_enemy_turn_speed(),
            capsule: default_enemy_capsule(),
        }
    }
}

/// Box trigger that hides a crouched player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverZoneConfig {
    /// World-space center
    pub position: Vec3,
    /// Full extents
    pub size: Vec3,
}

/// Static box of level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    pub center: Vec3,
    pub half_extents: Vec3,
}

/// A complete level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default = "default_level_name")]
    pub name: String,

    /// Actors below this height are teleported back
    #[serde(default = "default_floor_threshold")]
    pub floor_threshold: f32,

    #[serde(default)]
    pub physics: PhysicsConfig,

    #[serde(default = "default_floor")]
    pub floor: WallConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub enemies: Vec<EnemyConfig>,

    #[serde(default)]
    pub cover_zones: Vec<CoverZoneConfig>,

    #[serde(default)]
    pub walls: Vec<WallConfig>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            name: default_level_name(),
            floor_threshold: default_floor_threshold(),
            physics: PhysicsConfig::default(),
            floor: default_floor(),
            player: PlayerConfig::default(),
            enemies: Vec::new(),
            cover_zones: Vec::new(),
            walls: Vec::new(),
        }
    }
}

fn check_vision(index: usize, vision: &VisionConfig) -> Result<()> {
    let invalid = |what: &str, value: f32| -> Result<()> {
        Err(ConfigError::Invalid(format!("enemy {} {} out of range, got {}", index, what, value)))
    };

    if !vision.view_distance.is_finite() || vision.view_distance <= 0.0 {
        return invalid("view_distance", vision.view_distance);
    }
    if !vision.red_zone_distance.is_finite()
        || vision.red_zone_distance < 0.0
        || vision.red_zone_distance > vision.view_distance
    {
        return invalid("red_zone_distance", vision.red_zone_distance);
    }
    // NaN fails every comparison, so test the accepted range
    if !(vision.fov_degrees > 0.0 && vision.fov_degrees <= 360.0) {
        return invalid("fov_degrees", vision.fov_degrees);
    }
    if !(vision.vertical_fov_degrees > 0.0 && vision.vertical_fov_degrees <= 90.0) {
        return invalid("vertical_fov_degrees", vision.vertical_fov_degrees);
    }
    for (what, value) in [
        ("eye_height", vision.eye_height),
        ("height_threshold", vision.height_threshold),
        ("los_tolerance", vision.los_tolerance),
        ("standing_target_height", vision.standing_target_height),
        ("crouching_target_height", vision.crouching_target_height),
    ] {
        if !value.is_finite() || value < 0.0 {
            return invalid(what, value);
        }
    }
    Ok(())
}

impl LevelConfig {
    /// Load and validate a level file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_toml(&content)?;
        info!("Loaded level '{}' from {}", level.name, path.display());
        Ok(level)
    }

    /// Parse and validate a level from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let level: Self = toml::from_str(content)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<()> {
        self.physics
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.player.jump_cooldown.is_nan() || self.player.jump_cooldown <= 0.0 {
            return Err(ConfigError::Invalid("player jump_cooldown must be positive".into()));
        }

        for (index, enemy) in self.enemies.iter().enumerate() {
            let vision = &enemy.vision;
            if enemy.waypoints.is_empty() {
                return Err(ConfigError::Invalid(format!("enemy {} has no waypoints", index)));
            }
            if vision.ray_count == 0 {
                return Err(ConfigError::Invalid(format!("enemy {} has ray_count 0", index)));
            }
            check_vision(index, vision)?;
        }

        for (index, zone) in self.cover_zones.iter().enumerate() {
            if zone.size.cmple(Vec3::ZERO).any() {
                return Err(ConfigError::Invalid(format!("cover zone {} has a non-positive size", index)));
            }
        }

        Ok(())
    }

    /// Small built-in level: one guard, one wall, one cover zone
    pub fn demo() -> Self {
        Self {
            name: "demo".to_string(),
            enemies: vec![EnemyConfig::new(
                Vec3::new(0.0, 0.05, 10.0),
                vec![
                    Vec3::new(0.0, 0.0, 10.0),
                    Vec3::new(6.0, 0.0, 10.0),
                    Vec3::new(6.0, 0.0, 4.0),
                ],
            )],
            cover_zones: vec![CoverZoneConfig {
                position: Vec3::new(3.0, 1.0, 4.0),
                size: Vec3::new(2.0, 2.0, 2.0),
            }],
            walls: vec![WallConfig {
                center: Vec3::new(-3.0, 1.0, 6.0),
                half_extents: Vec3::new(0.25, 1.0, 2.0),
            }],
            ..Self::default()
        }
    }
}
