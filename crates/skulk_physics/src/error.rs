//! Error types for the physics adapter

use skulk_core::{EntityId, SimError};
use thiserror::Error;

/// Physics adapter errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Rigid body not found
    #[error("Rigid body not found: {0:?}")]
    BodyNotFound(crate::body::RigidBodyHandle),

    /// Collider not found
    #[error("Collider not found: {0:?}")]
    ColliderNotFound(crate::collider::ColliderHandle),

    /// Entity has no body in this world
    #[error("{0} has no physics body")]
    EntityNotInPhysics(EntityId),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),
}

impl From<PhysicsError> for SimError {
    fn from(err: PhysicsError) -> Self {
        match err {
            PhysicsError::EntityNotInPhysics(entity) => SimError::BodyMissing(entity),
            PhysicsError::BodyNotFound(_) | PhysicsError::ColliderNotFound(_) => {
                SimError::Degenerate("stale physics handle")
            }
            PhysicsError::InvalidConfig(_) => SimError::Degenerate("invalid physics configuration"),
        }
    }
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
