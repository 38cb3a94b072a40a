//! Mock collaborators and a small harness around `GameWorld`

#![allow(dead_code)]

use glam::Vec3;
use skulk_core::{
    CapsuleShape, EntityId, Handle, IdGenerator, InputState, LayerMask, RayHit, RayQuery, Raycaster, RigidBodies,
    SimError,
};
use skulk_game::{
    CharacterTemplate, ClipLibrary, CoverZones, Enemy, EnemyConfig, GameWorld, PhysicsBackend, PlayerConfig,
    PlayerController,
};
use std::collections::HashMap;
use std::sync::Arc;

pub const DT: f64 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct MockBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub capsule: Option<CapsuleShape>,
}

/// Kinematic stand-in for the physics engine.
///
/// Static geometry is a list of axis-aligned boxes on the environment layer.
/// Bodies integrate velocity with gravity and rest on the floor plane.
pub struct MockPhysics {
    pub bodies: HashMap<EntityId, MockBody>,
    pub boxes: Vec<(Vec3, Vec3)>,
    pub gravity: f32,
    pub floor_y: f32,
}

impl MockPhysics {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            boxes: vec![(Vec3::new(-100.0, -1.0, -100.0), Vec3::new(100.0, 0.0, 100.0))],
            gravity: 9.81,
            floor_y: 0.0,
        }
    }

    pub fn add_body(&mut self, entity: EntityId, position: Vec3) {
        self.bodies.insert(
            entity,
            MockBody {
                position,
                velocity: Vec3::ZERO,
                capsule: None,
            },
        );
    }

    pub fn add_wall(&mut self, center: Vec3, half_extents: Vec3) {
        self.boxes.push((center - half_extents, center + half_extents));
    }

    pub fn body(&self, entity: EntityId) -> MockBody {
        self.bodies[&entity]
    }
}

fn ray_box(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_min = 0.0f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < 1e-8 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let mut t1 = (min[axis] - o) / d;
        let mut t2 = (max[axis] - o) / d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

impl Raycaster for MockPhysics {
    fn cast(&self, query: &RayQuery) -> Option<RayHit> {
        if !query.filter.layers.intersects(LayerMask::ENVIRONMENT) {
            return None;
        }
        self.boxes
            .iter()
            .filter_map(|&(min, max)| ray_box(query.origin, query.direction, min, max))
            .filter(|&t| t <= query.max_distance)
            .reduce(f32::min)
            .map(|distance| RayHit { distance, entity: None })
    }
}

impl RigidBodies for MockPhysics {
    fn position(&self, entity: EntityId) -> skulk_core::Result<Vec3> {
        self.bodies
            .get(&entity)
            .map(|b| b.position)
            .ok_or(SimError::BodyMissing(entity))
    }

    fn set_position(&mut self, entity: EntityId, position: Vec3) -> skulk_core::Result<()> {
        let body = self.bodies.get_mut(&entity).ok_or(SimError::BodyMissing(entity))?;
        body.position = position;
        Ok(())
    }

    fn linear_velocity(&self, entity: EntityId) -> skulk_core::Result<Vec3> {
        self.bodies
            .get(&entity)
            .map(|b| b.velocity)
            .ok_or(SimError::BodyMissing(entity))
    }

    fn set_linear_velocity(&mut self, entity: EntityId, velocity: Vec3) -> skulk_core::Result<()> {
        let body = self.bodies.get_mut(&entity).ok_or(SimError::BodyMissing(entity))?;
        body.velocity = velocity;
        Ok(())
    }

    fn set_capsule(&mut self, entity: EntityId, shape: CapsuleShape) -> skulk_core::Result<()> {
        let body = self.bodies.get_mut(&entity).ok_or(SimError::BodyMissing(entity))?;
        body.capsule = Some(shape);
        Ok(())
    }
}

impl PhysicsBackend for MockPhysics {
    fn advance(&mut self, delta_time: f32) {
        for body in self.bodies.values_mut() {
            body.velocity.y -= self.gravity * delta_time;
            body.position += body.velocity * delta_time;
            if body.position.y < self.floor_y {
                body.position.y = self.floor_y;
                body.velocity.y = 0.0;
            }
        }
    }
}

/// A level driven step by step on a manual clock
pub struct Harness {
    pub world: GameWorld,
    pub physics: MockPhysics,
    pub animations: ClipLibrary,
    pub input: InputState,
    pub ids: IdGenerator,
    pub now: f64,
    pub player: EntityId,
}

impl Harness {
    pub fn new(player_at: Vec3) -> Self {
        Self::build(player_at, PlayerConfig::default(), &[])
    }

    /// Player at `player_at` plus cover zones as `(center, size)`
    pub fn build(player_at: Vec3, mut config: PlayerConfig, cover_zones: &[(Vec3, Vec3)]) -> Self {
        let ids = IdGenerator::new();
        let mut physics = MockPhysics::new();
        let mut animations = ClipLibrary::new();

        let template = Arc::new(CharacterTemplate::player());
        let player = ids.next_id();
        physics.add_body(player, player_at);
        animations.load_rig(player, &template.clips);
        config.spawn = player_at;

        let mut cover = CoverZones::new();
        for &(center, size) in cover_zones {
            cover.add_zone(center, size);
        }

        let controller = PlayerController::new(player, config, -10.0, template);
        Self {
            world: GameWorld::new(controller, cover),
            physics,
            animations,
            input: InputState::new(),
            ids,
            now: 0.0,
            player,
        }
    }

    /// Guard with default vision (view 12, red zone 7) standing on its only
    /// waypoint, facing +Z
    pub fn add_guard(&mut self, spawn: Vec3) -> Handle<Enemy> {
        self.add_enemy(EnemyConfig::new(spawn, vec![spawn]))
    }

    pub fn add_enemy(&mut self, config: EnemyConfig) -> Handle<Enemy> {
        let entity = self.ids.next_id();
        self.physics.add_body(entity, config.spawn);
        let enemy = self.spawn_enemy(entity, &config);
        self.world.add_enemy(enemy)
    }

    /// Enemy whose rigid body was never created
    pub fn add_enemy_without_body(&mut self, config: EnemyConfig) -> Handle<Enemy> {
        let entity = self.ids.next_id();
        let enemy = self.spawn_enemy(entity, &config);
        self.world.add_enemy(enemy)
    }

    fn spawn_enemy(&mut self, entity: EntityId, config: &EnemyConfig) -> Enemy {
        let template = Arc::new(CharacterTemplate::guard());
        self.animations.load_rig(entity, &template.clips);
        Enemy::new(entity, config, -10.0, template).unwrap()
    }

    /// Run one step at the current time, then advance the clock
    pub fn step(&mut self) {
        self.world
            .step(self.now, &self.input, &mut self.physics, &mut self.animations);
        self.input.end_frame();
        self.now += DT;
    }

    /// Step until the clock reaches `until`
    pub fn run_until(&mut self, until: f64) {
        while self.now <= until + 1e-9 {
            self.step();
        }
    }

    pub fn enemy(&self, handle: Handle<Enemy>) -> &Enemy {
        self.world.enemy(handle).unwrap()
    }
}
