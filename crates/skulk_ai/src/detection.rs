//! Player detection
//!
//! Gates, in order: alert already up, range, stealth suppression,
//! horizontal cone, vertical cone, line of sight. The first gate that fails
//! names the outcome. Only a `Spotted` outcome writes shared state, and the
//! only write is raising the global alert.

use crate::perception::VisionConfig;
use crate::steering::{forward_from_yaw, horizontal};
use glam::Vec3;
use log::debug;
use skulk_core::{EntityId, PlayerSnapshot, RayQuery, Raycaster, WorldState};

/// Where an enemy is looking from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub entity: EntityId,
    /// Feet position
    pub position: Vec3,
    /// Facing yaw, radians
    pub yaw: f32,
}

/// Result of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionOutcome {
    /// Global alert already raised; evaluation is a no-op
    AlreadyAlerted,
    /// Player at or beyond view distance
    OutOfRange,
    /// Player crouched in cover
    Hidden,
    /// Outside the horizontal field of view
    OutsideCone,
    /// Too steep above or below the eye line
    OutsideVerticalCone,
    /// Level geometry between eye and player
    Occluded,
    /// NaN or zero-length geometry; cannot perceive this step
    Degenerate,
    /// All gates passed
    Spotted { red_zone: bool },
}

impl DetectionOutcome {
    pub fn is_spotted(&self) -> bool {
        matches!(self, Self::Spotted { .. })
    }
}

/// Decides whether an enemy spots the player
#[derive(Debug, Clone)]
pub struct DetectionEvaluator {
    config: VisionConfig,
}

impl DetectionEvaluator {
    pub fn new(config: VisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Evaluate against a snapshot without touching shared state
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn evaluate(
        &self,
        observer: &Observer,
        player: &PlayerSnapshot,
        alerted: bool,
        raycaster: &dyn Raycaster,
    ) -> DetectionOutcome {
        if alerted {
            return DetectionOutcome::AlreadyAlerted;
        }

        let cfg = &self.config;
        let offset = player.position - observer.position;
        if !offset.is_finite() || !observer.yaw.is_finite() {
            return DetectionOutcome::Degenerate;
        }

        let flat = horizontal(offset);
        let distance = flat.length();
        if distance >= cfg.view_distance {
            return DetectionOutcome::OutOfRange;
        }

        let height_diff = offset.y.abs();
        let red_zone = distance <= cfg.red_zone_distance && height_diff <= cfg.height_threshold;

        if player.is_hidden() && !(red_zone && cfg.red_zone_pierces_cover) {
            return DetectionOutcome::Hidden;
        }

        let Some(to_player) = flat.try_normalize() else {
            return DetectionOutcome::Degenerate;
        };
        let angle = forward_from_yaw(observer.yaw).angle_between(to_player);
        if angle.is_nan() {
            return DetectionOutcome::Degenerate;
        }
        // Written so a NaN limit closes the gate
        if !(angle < cfg.half_fov_radians()) {
            return DetectionOutcome::OutsideCone;
        }

        let elevation = height_diff.atan2(distance);
        if !(elevation < cfg.vertical_fov_degrees.to_radians()) {
            return DetectionOutcome::OutsideVerticalCone;
        }

        let eye = observer.position + Vec3::new(0.0, cfg.eye_height, 0.0);
        let target = player.position + Vec3::new(0.0, cfg.target_height(player.crouching), 0.0);
        let sight = target - eye;
        let sight_distance = sight.length();
        let Some(direction) = sight.try_normalize() else {
            return DetectionOutcome::Degenerate;
        };

        let query = RayQuery::new(eye, direction, sight_distance, cfg.ray_filter(observer.entity));
        if let Some(hit) = raycaster.cast(&query) {
            if hit.distance < sight_distance - cfg.los_tolerance {
                return DetectionOutcome::Occluded;
            }
        }

        DetectionOutcome::Spotted { red_zone }
    }

    /// Evaluate against the current world state and raise the alert on a
    /// sighting. The caller marks its own local detection from the outcome.
    pub fn run(&self, observer: &Observer, world: &WorldState, raycaster: &dyn Raycaster) -> DetectionOutcome {
        let snapshot = world.player_snapshot();
        let outcome = self.evaluate(observer, &snapshot, world.is_alerted(), raycaster);

        match outcome {
            DetectionOutcome::Spotted { red_zone } => {
                debug!("{} spotted the player (red zone: {})", observer.entity, red_zone);
                world.raise_alert(observer.entity);
            }
            DetectionOutcome::Degenerate => {
                debug!("{} cannot perceive this step", observer.entity);
            }
            _ => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skulk_core::RayHit;

    struct Open;

    impl Raycaster for Open {
        fn cast(&self, _query: &RayQuery) -> Option<RayHit> {
            None
        }
    }

    /// Reports a hit at a fixed distance along every ray
    struct WallAt(f32);

    impl Raycaster for WallAt {
        fn cast(&self, query: &RayQuery) -> Option<RayHit> {
            (self.0 <= query.max_distance).then_some(RayHit {
                distance: self.0,
                entity: None,
            })
        }
    }

    fn evaluator() -> DetectionEvaluator {
        DetectionEvaluator::new(VisionConfig {
            view_distance: 10.0,
            red_zone_distance: 7.0,
            ..Default::default()
        })
    }

    fn observer() -> Observer {
        Observer {
            entity: EntityId::new(1),
            position: Vec3::ZERO,
            yaw: 0.0,
        }
    }

    fn player_at(z: f32) -> PlayerSnapshot {
        PlayerSnapshot {
            position: Vec3::new(0.0, 0.0, z),
            ..Default::default()
        }
    }

    #[test]
    fn test_nan_fov_closes_cone() {
        let e = DetectionEvaluator::new(VisionConfig {
            fov_degrees: f32::NAN,
            vertical_fov_degrees: f32::NAN,
            ..Default::default()
        });
        assert_eq!(e.evaluate(&observer(), &player_at(-5.0), false, &Open), DetectionOutcome::OutsideCone);
        assert_eq!(e.evaluate(&observer(), &player_at(5.0), false, &Open), DetectionOutcome::OutsideCone);
    }

    #[test]
    fn test_alerted_is_noop() {
        let outcome = evaluator().evaluate(&observer(), &player_at(3.0), true, &Open);
        assert_eq!(outcome, DetectionOutcome::AlreadyAlerted);
    }

    #[test]
    fn test_range_gate() {
        let e = evaluator();
        assert_eq!(e.evaluate(&observer(), &player_at(10.0), false, &Open), DetectionOutcome::OutOfRange);
        assert_eq!(e.evaluate(&observer(), &player_at(25.0), false, &Open), DetectionOutcome::OutOfRange);
        assert!(e.evaluate(&observer(), &player_at(9.9), false, &Open).is_spotted());
    }

    #[test]
    fn test_red_zone_classification() {
        let e = evaluator();
        assert_eq!(
            e.evaluate(&observer(), &player_at(5.0), false, &Open),
            DetectionOutcome::Spotted { red_zone: true }
        );
        assert_eq!(
            e.evaluate(&observer(), &player_at(8.0), false, &Open),
            DetectionOutcome::Spotted { red_zone: false }
        );
    }

    #[test]
    fn test_height_difference_drops_red_zone_only() {
        let mut player = player_at(5.0);
        player.position.y = 2.0;
        // atan2(2, 5) is about 22 degrees, inside the vertical cone
        assert_eq!(
            evaluator().evaluate(&observer(), &player, false, &Open),
            DetectionOutcome::Spotted { red_zone: false }
        );
    }

    #[test]
    fn test_vertical_gate() {
        let mut player = player_at(2.0);
        player.position.y = 3.0;
        assert_eq!(
            evaluator().evaluate(&observer(), &player, false, &Open),
            DetectionOutcome::OutsideVerticalCone
        );
    }

    #[test]
    fn test_horizontal_cone() {
        let e = evaluator();
        let mut behind = player_at(-4.0);
        assert_eq!(e.evaluate(&observer(), &behind, false, &Open), DetectionOutcome::OutsideCone);

        // 60 degrees off axis, outside a 90 degree cone
        behind.position = Vec3::new(60f32.to_radians().sin(), 0.0, 60f32.to_radians().cos()) * 4.0;
        assert_eq!(e.evaluate(&observer(), &behind, false, &Open), DetectionOutcome::OutsideCone);
    }

    #[test]
    fn test_cover_suppression_and_override() {
        let mut player = player_at(5.0);
        player.crouching = true;
        player.in_cover = true;
        assert_eq!(evaluator().evaluate(&observer(), &player, false, &Open), DetectionOutcome::Hidden);

        // jumping breaks stealth
        player.jumping = true;
        assert!(evaluator().evaluate(&observer(), &player, false, &Open).is_spotted());
        player.jumping = false;

        let piercing = DetectionEvaluator::new(VisionConfig {
            view_distance: 10.0,
            red_zone_distance: 7.0,
            red_zone_pierces_cover: true,
            ..Default::default()
        });
        assert!(piercing.evaluate(&observer(), &player, false, &Open).is_spotted());

        // outside the red zone cover still hides
        player.position.z = 8.0;
        assert_eq!(piercing.evaluate(&observer(), &player, false, &Open), DetectionOutcome::Hidden);
    }

    #[test]
    fn test_line_of_sight_tolerance() {
        let e = evaluator();
        assert_eq!(e.evaluate(&observer(), &player_at(6.0), false, &WallAt(3.0)), DetectionOutcome::Occluded);
        // hit within tolerance of the target is the player's own surroundings
        let near_target = WallAt(5.95);
        assert!(e.evaluate(&observer(), &player_at(6.0), false, &near_target).is_spotted());
    }

    #[test]
    fn test_nan_is_degenerate() {
        let mut player = player_at(3.0);
        player.position.x = f32::NAN;
        assert_eq!(evaluator().evaluate(&observer(), &player, false, &Open), DetectionOutcome::Degenerate);
    }

    #[test]
    fn test_run_raises_alert_once() {
        let mut world = WorldState::new();
        world.set_player_position(Vec3::new(0.0, 0.0, 5.0));
        let e = evaluator();

        assert!(e.run(&observer(), &world, &Open).is_spotted());
        assert!(world.is_alerted());
        assert_eq!(world.alert().raised_by(), Some(EntityId::new(1)));

        let second = Observer {
            entity: EntityId::new(2),
            ..observer()
        };
        assert_eq!(e.run(&second, &world, &Open), DetectionOutcome::AlreadyAlerted);
        assert_eq!(world.alert().raised_by(), Some(EntityId::new(1)));
    }
}
