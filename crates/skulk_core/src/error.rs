//! Error types shared by the simulation crates

use crate::id::EntityId;
use thiserror::Error;

/// Per-entity step failures.
///
/// None of these halt the frame loop: the owning entity skips the rest of
/// its step and retries on the next frame.
#[derive(Debug, Error)]
pub enum SimError {
    /// The entity has no rigid body attached (yet)
    #[error("No rigid body bound to {0}")]
    BodyMissing(EntityId),

    /// An animation clip has not been loaded for the entity
    #[error("Animation clip '{clip}' not loaded for {entity}")]
    ClipMissing { entity: EntityId, clip: String },

    /// Geometry collapsed to a NaN or zero-length direction
    #[error("Degenerate geometry: {0}")]
    Degenerate(&'static str),
}

/// Result type for simulation steps
pub type Result<T> = std::result::Result<T, SimError>;
