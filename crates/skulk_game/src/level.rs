//! Level construction from configuration

use crate::config::LevelConfig;
use crate::cover::CoverZones;
use crate::enemy::Enemy;
use crate::error::{ConfigError, Result};
use crate::player::PlayerController;
use crate::presentation::CharacterTemplate;
use crate::world::GameWorld;
use log::info;
use skulk_core::IdGenerator;
use skulk_physics::{CollisionLayer, PhysicsWorld};
use std::sync::Arc;

/// Build static geometry, characters and cover zones for `config`
pub fn spawn_level(config: &LevelConfig, physics: &mut PhysicsWorld, ids: &IdGenerator) -> Result<GameWorld> {
    config.validate()?;

    physics.spawn_static_box(config.floor.center, config.floor.half_extents);
    for wall in &config.walls {
        physics.spawn_static_box(wall.center, wall.half_extents);
    }

    let player_entity = ids.next_id();
    physics.spawn_character(
        player_entity,
        config.player.spawn,
        config.player.standing_capsule,
        CollisionLayer::PLAYER,
    );
    let player = PlayerController::new(
        player_entity,
        config.player.clone(),
        config.floor_threshold,
        Arc::new(CharacterTemplate::player()),
    );

    let mut cover = CoverZones::new();
    for zone in &config.cover_zones {
        cover.add_zone(zone.position, zone.size);
    }

    let mut world = GameWorld::new(player, cover);

    let guard = Arc::new(CharacterTemplate::guard());
    for enemy_config in &config.enemies {
        let entity = ids.next_id();
        let enemy = Enemy::new(entity, enemy_config, config.floor_threshold, Arc::clone(&guard))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        physics.spawn_character(entity, enemy_config.spawn, enemy_config.capsule, CollisionLayer::ENEMIES);
        world.add_enemy(enemy);
    }

    physics.sync_query_pipeline();
    info!(
        "Level '{}' ready: {} enemies, {} cover zones, {} walls",
        config.name,
        config.enemies.len(),
        config.cover_zones.len(),
        config.walls.len()
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skulk_physics::PhysicsConfig;

    #[test]
    fn test_spawn_demo() {
        let config = LevelConfig::demo();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        let world = spawn_level(&config, &mut physics, &IdGenerator::new()).unwrap();

        assert_eq!(world.enemies().count(), 1);
        assert_eq!(world.cover().zone_count(), 1);
        // floor, wall, player, guard
        assert_eq!(physics.body_count(), 4);
        assert!(physics.body_for(world.player().entity()).is_some());
    }

    #[test]
    fn test_rejects_invalid_level() {
        let mut config = LevelConfig::demo();
        config.enemies[0].waypoints.clear();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        assert!(spawn_level(&config, &mut physics, &IdGenerator::new()).is_err());
        assert_eq!(physics.body_count(), 0);
    }
}
