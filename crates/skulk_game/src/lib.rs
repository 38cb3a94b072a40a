//! Skulk Game - Stealth simulation on top of the AI and physics crates
//!
//! Provides:
//! - Player controller: isometric movement, crouch, jump and dash-jump
//! - Enemies wiring perception, detection and patrol behaviour to bodies
//! - Cover zones publishing the player's cover flag
//! - `GameWorld`, the fixed-order step loop
//! - TOML level configuration and level spawning

pub mod animation;
pub mod backend;
pub mod config;
pub mod cover;
pub mod enemy;
pub mod error;
pub mod level;
pub mod player;
pub mod presentation;
pub mod world;

pub mod prelude {
    pub use crate::animation::{AnimationState, AnimationTracker, ClipLibrary, PlayerAnimation};
    pub use crate::backend::PhysicsBackend;
    pub use crate::config::{CoverZoneConfig, EnemyConfig, LevelConfig, PlayerConfig, WallConfig};
    pub use crate::cover::CoverZones;
    pub use crate::enemy::Enemy;
    pub use crate::error::{ConfigError, Result};
    pub use crate::level::spawn_level;
    pub use crate::player::{movement_heading, PlayerController, ISO_FORWARD, ISO_RIGHT};
    pub use crate::presentation::{CharacterInstance, CharacterTemplate, Tint, TintTracker};
    pub use crate::world::{GameWorld, TimerOwner};
}

pub use prelude::*;
