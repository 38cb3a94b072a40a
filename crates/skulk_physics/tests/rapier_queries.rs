//! Ray queries against real Rapier colliders

use approx::assert_relative_eq;
use glam::Vec3;
use skulk_core::{CapsuleShape, EntityId, LayerMask, RayFilter, RayQuery, Raycaster, RigidBodies};
use skulk_physics::prelude::*;

fn capsule() -> CapsuleShape {
    CapsuleShape::new(0.5, 0.3, 0.8)
}

fn level() -> PhysicsWorld {
    let mut world = PhysicsWorld::new(PhysicsConfig::default());
    // floor top at y = 0
    world.spawn_static_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0));
    world
}

#[test]
fn test_wall_blocks_vision_ray() {
    let mut world = level();
    // wall face at z = 3.0
    world.spawn_static_box(Vec3::new(0.0, 1.0, 3.5), Vec3::new(2.0, 1.0, 0.5));
    let enemy = EntityId::new(1);
    world.spawn_character(enemy, Vec3::ZERO, capsule(), CollisionLayer::ENEMIES);
    world.sync_query_pipeline();

    let query = RayQuery::new(Vec3::new(0.0, 1.5, 0.0), Vec3::Z, 10.0, RayFilter::vision(enemy));
    let hit = world.cast(&query).expect("wall should be hit");

    assert_relative_eq!(hit.distance, 3.0, epsilon = 1e-3);
    assert_eq!(hit.entity, None);
}

#[test]
fn test_vision_ray_ignores_actors_and_caster() {
    let mut world = level();
    let enemy = EntityId::new(1);
    let player = EntityId::new(2);
    world.spawn_character(enemy, Vec3::ZERO, capsule(), CollisionLayer::ENEMIES);
    world.spawn_character(player, Vec3::new(0.0, 0.0, 4.0), capsule(), CollisionLayer::PLAYER);
    world.sync_query_pipeline();

    let query = RayQuery::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 10.0, RayFilter::vision(enemy));
    assert!(world.cast(&query).is_none());
}

#[test]
fn test_unfiltered_ray_reports_entity() {
    let mut world = level();
    let enemy = EntityId::new(1);
    let player = EntityId::new(2);
    world.spawn_character(enemy, Vec3::ZERO, capsule(), CollisionLayer::ENEMIES);
    world.spawn_character(player, Vec3::new(0.0, 0.0, 4.0), capsule(), CollisionLayer::PLAYER);
    world.sync_query_pipeline();

    let filter = RayFilter {
        layers: LayerMask::PLAYER,
        exclude_dynamic: false,
        exclude: Some(enemy),
    };
    let query = RayQuery::new(Vec3::new(0.0, 0.8, 0.0), Vec3::Z, 10.0, filter);
    let hit = world.cast(&query).expect("player capsule should be hit");

    assert_eq!(hit.entity, Some(player));
    assert_relative_eq!(hit.distance, 3.7, epsilon = 1e-3);
}

#[test]
fn test_ground_probe() {
    let mut world = level();
    let player = EntityId::new(1);
    world.spawn_character(player, Vec3::ZERO, capsule(), CollisionLayer::PLAYER);
    world.sync_query_pipeline();

    let probe = |world: &PhysicsWorld| {
        let origin = world.position(player).unwrap() + Vec3::new(0.0, 0.1, 0.0);
        world.cast(&RayQuery::new(origin, Vec3::NEG_Y, 0.2, RayFilter::ground(player)))
    };
    assert!(probe(&world).is_some());

    world.set_position(player, Vec3::new(0.0, 3.0, 0.0)).unwrap();
    world.step(1.0 / 60.0);
    assert!(probe(&world).is_none());
}

#[test]
fn test_set_capsule_and_velocity() {
    let mut world = level();
    let player = EntityId::new(1);
    world.spawn_character(player, Vec3::new(0.0, 0.0, 0.0), capsule(), CollisionLayer::PLAYER);

    world.set_capsule(player, CapsuleShape::new(0.3, 0.25, 0.55)).unwrap();
    world.set_linear_velocity(player, Vec3::new(2.0, 0.0, 0.0)).unwrap();
    assert_relative_eq!(world.linear_velocity(player).unwrap().x, 2.0);

    assert!(world.set_capsule(EntityId::new(99), capsule()).is_err());
}
