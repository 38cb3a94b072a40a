//! Physics collaborator seen by the step loop

use skulk_core::{Raycaster, RigidBodies};
use skulk_physics::PhysicsWorld;

/// Everything the simulation needs from a physics engine: rigid-body
/// commands, ray queries and advancing time.
pub trait PhysicsBackend: RigidBodies + Raycaster {
    /// Integrate `delta_time` seconds
    fn advance(&mut self, delta_time: f32);
}

impl PhysicsBackend for PhysicsWorld {
    fn advance(&mut self, delta_time: f32) {
        self.step(delta_time);
    }
}
