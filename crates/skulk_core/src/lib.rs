//! # skulk_core - Skulk Core
//!
//! Primitives shared by every Skulk crate:
//!
//! - **Ids and handles**: entity ids that bind a simulated actor to its
//!   physics body and animation rig, plus generational handles for
//!   entity storage.
//! - **Shared world state**: the player facts and the one-way alert latch
//!   read by every enemy each step.
//! - **Scheduled timers**: deadline entries with generation counters so a
//!   timer never reaches an entity that was removed or reset.
//! - **Service contracts**: the raycast, rigid-body, animation and input
//!   collaborators the simulation consumes but never implements.
//!
//! ## Step ordering
//!
//! ```text
//! Input -> Player -> WorldState -> { Perception -> Detection -> Behaviour } per enemy
//! ```

pub mod error;
pub mod handle;
pub mod id;
pub mod input;
pub mod schedule;
pub mod services;
pub mod state;

pub mod prelude {
    pub use crate::error::{Result, SimError};
    pub use crate::handle::{Handle, HandleMap};
    pub use crate::id::{EntityId, IdGenerator};
    pub use crate::input::{Control, InputSource, InputState};
    pub use crate::schedule::{FiredTimer, Scheduler, SimTime, TimerId, TimerKind};
    pub use crate::services::{
        AnimationPlayer, CapsuleShape, LayerMask, PlaybackMode, PlaybackSettings, RayFilter,
        RayHit, RayQuery, Raycaster, RigidBodies,
    };
    pub use crate::state::{AlertLatch, PlayerSnapshot, WorldState};
}

pub use prelude::*;
