//! Skulk Physics - Rapier 3D adapter
//!
//! Implements the simulation's [`Raycaster`](skulk_core::Raycaster) and
//! [`RigidBodies`](skulk_core::RigidBodies) contracts on top of Rapier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 PhysicsWorld                  │
//! │  ┌─────────────┐  ┌─────────────┐  ┌────────┐ │
//! │  │ RigidBodySet│  │ ColliderSet │  │ Query  │ │
//! │  └─────────────┘  └─────────────┘  └────────┘ │
//! │        EntityId -> body / colliders map       │
//! └──────────────────────────────────────────────┘
//!           │                         │
//!           ▼                         ▼
//!     RigidBodies               Raycaster
//!   (velocity, capsule)   (layers, exclusions)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use skulk_physics::prelude::*;
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default());
//! physics.spawn_static_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0));
//! physics.spawn_character(player_id, Vec3::new(0.0, 1.0, 0.0), capsule, CollisionLayer::PLAYER);
//! physics.step(1.0 / 60.0);
//! ```

pub mod body;
pub mod collider;
pub mod config;
pub mod error;
pub mod layers;
pub mod query;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{RigidBodyDesc, RigidBodyHandle, RigidBodyType};
    pub use crate::collider::{ColliderDesc, ColliderHandle, ColliderShape};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::layers::{CollisionGroups, CollisionLayer};
    pub use crate::query::PhysicsQuery;
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
