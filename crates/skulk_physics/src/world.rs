//! Physics world - main simulation container

use crate::body::{RigidBodyDesc, RigidBodyHandle};
use crate::collider::{ColliderDesc, ColliderHandle, ColliderShape};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::layers::CollisionLayer;
use crate::query::PhysicsQuery;
use glam::Vec3;
use log::debug;
use rapier3d::prelude as rapier;
use skulk_core::{CapsuleShape, EntityId, RayHit, RayQuery, Raycaster, RigidBodies};
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    config: PhysicsConfig,
    pipeline: rapier::PhysicsPipeline,
    gravity: rapier::Vector<f32>,
    integration_params: rapier::IntegrationParameters,
    islands: rapier::IslandManager,
    broad_phase: rapier::DefaultBroadPhase,
    narrow_phase: rapier::NarrowPhase,
    impulse_joints: rapier::ImpulseJointSet,
    multibody_joints: rapier::MultibodyJointSet,
    ccd_solver: rapier::CCDSolver,
    query_pipeline: rapier::QueryPipeline,
    bodies: rapier::RigidBodySet,
    colliders: rapier::ColliderSet,

    /// Entity to body mapping
    entity_to_body: HashMap<EntityId, RigidBodyHandle>,

    /// Entity to collider mapping; the first entry is the character capsule
    entity_to_collider: HashMap<EntityId, Vec<ColliderHandle>>,

    /// Accumulated time for fixed timestep
    accumulated_time: f32,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: PhysicsConfig) -> Self {
        let gravity = rapier::Vector::new(config.gravity[0], config.gravity[1], config.gravity[2]);

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;
        integration_params.num_solver_iterations =
            NonZeroUsize::new(config.solver_iterations).unwrap_or(NonZeroUsize::MIN);

        Self {
            config,
            pipeline: rapier::PhysicsPipeline::new(),
            gravity,
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            entity_to_body: HashMap::new(),
            entity_to_collider: HashMap::new(),
            accumulated_time: 0.0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    // ==================== Bodies and colliders ====================

    /// Create a rigid body, optionally bound to an entity
    pub fn create_rigid_body(&mut self, entity: Option<EntityId>, desc: RigidBodyDesc) -> RigidBodyHandle {
        let handle = RigidBodyHandle(self.bodies.insert(desc.to_rapier_builder()));
        if let Some(entity) = entity {
            self.entity_to_body.insert(entity, handle);
        }
        handle
    }

    /// Create a collider, optionally bound to an entity and attached to a body
    pub fn create_collider(
        &mut self,
        entity: Option<EntityId>,
        mut desc: ColliderDesc,
        parent: Option<RigidBodyHandle>,
    ) -> ColliderHandle {
        if let Some(entity) = entity {
            desc.user_data = entity.to_user_data();
        }

        let builder = desc.to_rapier_builder();
        let handle = ColliderHandle(match parent {
            Some(body) => self.colliders.insert_with_parent(builder, body.0, &mut self.bodies),
            None => self.colliders.insert(builder),
        });

        if let Some(entity) = entity {
            self.entity_to_collider.entry(entity).or_default().push(handle);
        }
        handle
    }

    /// Static box of level geometry
    pub fn spawn_static_box(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let body = self.create_rigid_body(None, RigidBodyDesc::fixed().with_position(center));
        self.create_collider(
            None,
            ColliderDesc::new(ColliderShape::cuboid(half_extents)).with_layer(CollisionLayer::ENVIRONMENT),
            Some(body),
        )
    }

    /// Upright capsule character bound to `entity`
    pub fn spawn_character(
        &mut self,
        entity: EntityId,
        position: Vec3,
        capsule: CapsuleShape,
        layer: CollisionLayer,
    ) -> RigidBodyHandle {
        let body = self.create_rigid_body(
            Some(entity),
            RigidBodyDesc::character().with_position(position),
        );
        self.create_collider(Some(entity), ColliderDesc::character(capsule, layer), Some(body));
        debug!("Spawned {} character at {:?}", entity, position);
        body
    }

    /// Remove all physics objects for an entity
    pub fn remove_entity(&mut self, entity: EntityId) {
        if let Some(colliders) = self.entity_to_collider.remove(&entity) {
            for handle in colliders {
                self.colliders.remove(handle.0, &mut self.islands, &mut self.bodies, true);
            }
        }

        if let Some(handle) = self.entity_to_body.remove(&entity) {
            self.bodies.remove(
                handle.0,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }
    }

    /// Get the rigid body handle for an entity
    pub fn body_for(&self, entity: EntityId) -> Option<RigidBodyHandle> {
        self.entity_to_body.get(&entity).copied()
    }

    fn body(&self, entity: EntityId) -> Result<&rapier::RigidBody> {
        let handle = self.body_for(entity).ok_or(PhysicsError::EntityNotInPhysics(entity))?;
        self.bodies.get(handle.0).ok_or(PhysicsError::BodyNotFound(handle))
    }

    fn body_mut(&mut self, entity: EntityId) -> Result<&mut rapier::RigidBody> {
        let handle = self.body_for(entity).ok_or(PhysicsError::EntityNotInPhysics(entity))?;
        self.bodies.get_mut(handle.0).ok_or(PhysicsError::BodyNotFound(handle))
    }

    // ==================== Simulation ====================

    /// Step the physics simulation with fixed timestep
    pub fn step(&mut self, delta_time: f32) {
        self.accumulated_time += delta_time;

        let mut steps = 0;
        while self.accumulated_time >= self.config.timestep && steps < self.config.max_substeps {
            self.pipeline.step(
                &self.gravity,
                &self.integration_params,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                None,
                &(),
                &(),
            );
            self.accumulated_time -= self.config.timestep;
            steps += 1;
        }

        // Drop time we could not catch up on instead of spiralling
        if steps == self.config.max_substeps {
            self.accumulated_time = self.accumulated_time.min(self.config.timestep);
        }

        self.query_pipeline.update(&self.colliders);
    }

    /// Sync the query pipeline after spawning, before the first step
    pub fn sync_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.colliders);
    }

    /// Get a query interface for raycasting
    pub fn query(&self) -> PhysicsQuery<'_> {
        PhysicsQuery {
            query_pipeline: &self.query_pipeline,
            colliders: &self.colliders,
            bodies: &self.bodies,
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl Raycaster for PhysicsWorld {
    fn cast(&self, query: &RayQuery) -> Option<RayHit> {
        let exclude = query
            .filter
            .exclude
            .and_then(|entity| self.body_for(entity))
            .map(|h| h.0);
        self.query().raycast(query, exclude)
    }
}

fn to_glam(v: &rapier::Vector<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

impl RigidBodies for PhysicsWorld {
    fn position(&self, entity: EntityId) -> skulk_core::Result<Vec3> {
        Ok(to_glam(self.body(entity)?.translation()))
    }

    fn set_position(&mut self, entity: EntityId, position: Vec3) -> skulk_core::Result<()> {
        let body = self.body_mut(entity)?;
        body.set_translation(rapier::Vector::new(position.x, position.y, position.z), true);
        Ok(())
    }

    fn linear_velocity(&self, entity: EntityId) -> skulk_core::Result<Vec3> {
        Ok(to_glam(self.body(entity)?.linvel()))
    }

    fn set_linear_velocity(&mut self, entity: EntityId, velocity: Vec3) -> skulk_core::Result<()> {
        let body = self.body_mut(entity)?;
        body.set_linvel(rapier::Vector::new(velocity.x, velocity.y, velocity.z), true);
        Ok(())
    }

    fn set_capsule(&mut self, entity: EntityId, shape: CapsuleShape) -> skulk_core::Result<()> {
        let handle = self
            .entity_to_collider
            .get(&entity)
            .and_then(|colliders| colliders.first().copied())
            .ok_or(PhysicsError::EntityNotInPhysics(entity))?;
        let collider = self
            .colliders
            .get_mut(handle.0)
            .ok_or(PhysicsError::ColliderNotFound(handle))?;

        collider.set_shape(ColliderShape::from(shape).to_rapier());
        collider.set_translation_wrt_parent(rapier::Vector::new(0.0, shape.offset_y, 0.0));
        Ok(())
    }
}
