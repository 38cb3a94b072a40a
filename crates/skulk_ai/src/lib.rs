//! Skulk AI - Enemy perception and behaviour
//!
//! Per enemy, per step:
//!
//! - **Perception**: sweep a horizontal fan of vision rays and record the
//!   distance to the nearest obstruction along each.
//! - **Detection**: decide whether the player is spotted this step and, if
//!   so, raise the global alert.
//! - **Behaviour**: patrol a cyclic waypoint route, pause at each waypoint,
//!   and switch to pursuit for good once the alert is up.
//!
//! # Example
//!
//! ```ignore
//! use skulk_ai::prelude::*;
//!
//! let sample = field.sweep(enemy_id, position, yaw, &physics);
//! let outcome = evaluator.run(&observer, &world_state, &physics);
//! let directive = brain.update(&situation, now, owner, &mut timers);
//! ```

pub mod detection;
pub mod patrol;
pub mod perception;
pub mod state_machine;
pub mod steering;

pub mod prelude {
    pub use crate::detection::{DetectionEvaluator, DetectionOutcome, Observer};
    pub use crate::patrol::{Directive, EnemyState, Gait, PatrolBrain, PatrolConfig, Situation};
    pub use crate::perception::{PerceptionField, PerceptionSample, RaySample, VisionConfig, VisionOverlay};
    pub use crate::state_machine::{State, StateMachine};
    pub use crate::steering::{face_towards, forward_from_yaw, horizontal, yaw_from_direction, Seek};
}

pub use prelude::*;
