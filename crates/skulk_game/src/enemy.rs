//! Patrolling enemy
//!
//! Each step runs perception, then detection, then behaviour, in that
//! order, against the world state the player controller just published.

use crate::animation::AnimationTracker;
use crate::backend::PhysicsBackend;
use crate::config::EnemyConfig;
use crate::presentation::{CharacterInstance, CharacterTemplate, TintTracker};
use crate::world::TimerOwner;
use glam::{Quat, Vec3};
use log::info;
use skulk_ai::{
    face_towards, horizontal, yaw_from_direction, DetectionEvaluator, DetectionOutcome, Directive, EnemyState, Gait,
    Observer, PatrolBrain, PerceptionField, Seek, Situation, VisionOverlay,
};
use skulk_core::{AnimationPlayer, EntityId, Handle, RigidBodies, Scheduler, SimTime, TimerId, WorldState};
use std::sync::Arc;

/// One guard with its sensors, brain and visuals
pub struct Enemy {
    entity: EntityId,
    perception: PerceptionField,
    detector: DetectionEvaluator,
    brain: PatrolBrain,
    turn_speed: f32,
    floor_threshold: f32,
    rotation: Quat,
    detected_locally: bool,
    last_outcome: Option<DetectionOutcome>,
    overlay: VisionOverlay,
    animation: AnimationTracker<Gait>,
    tint: TintTracker,
    instance: CharacterInstance,
}

impl Enemy {
    pub fn new(
        entity: EntityId,
        config: &EnemyConfig,
        floor_threshold: f32,
        template: Arc<CharacterTemplate>,
    ) -> skulk_core::Result<Self> {
        let brain = PatrolBrain::new(config.waypoints.clone(), config.patrol.clone())?;

        // Start out facing the first waypoint
        let rotation = yaw_from_direction(brain.current_waypoint() - config.spawn)
            .map(Quat::from_rotation_y)
            .unwrap_or(Quat::IDENTITY);

        let mut instance = CharacterInstance::new(template);
        instance.position = config.spawn;
        instance.rotation = rotation;

        Ok(Self {
            entity,
            perception: PerceptionField::new(config.vision.clone()),
            detector: DetectionEvaluator::new(config.vision.clone()),
            brain,
            turn_speed: config.turn_speed,
            floor_threshold,
            rotation,
            detected_locally: false,
            last_outcome: None,
            overlay: VisionOverlay::default(),
            animation: AnimationTracker::new(),
            tint: TintTracker::new(),
            instance,
        })
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn state(&self) -> EnemyState {
        self.brain.state()
    }

    pub fn brain(&self) -> &PatrolBrain {
        &self.brain
    }

    pub fn perception(&self) -> &PerceptionField {
        &self.perception
    }

    /// This enemy's own sighting, distinct from the global alert
    pub fn is_detected_locally(&self) -> bool {
        self.detected_locally
    }

    pub fn last_outcome(&self) -> Option<DetectionOutcome> {
        self.last_outcome
    }

    pub fn overlay(&self) -> &VisionOverlay {
        &self.overlay
    }

    pub fn instance(&self) -> &CharacterInstance {
        &self.instance
    }

    pub fn animation(&self) -> Option<Gait> {
        self.animation.current()
    }

    pub fn facing_yaw(&self) -> f32 {
        yaw_from_direction(self.rotation * Vec3::Z).unwrap_or(0.0)
    }

    /// Deliver a fired timer addressed to this enemy
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        self.brain.on_timer(id)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update<P: PhysicsBackend>(
        &mut self,
        handle: Handle<Enemy>,
        now: SimTime,
        dt: f32,
        world: &WorldState,
        physics: &mut P,
        animations: &mut dyn AnimationPlayer,
        timers: &mut Scheduler<TimerOwner>,
    ) -> skulk_core::Result<()> {
        let position = physics.position(self.entity)?;

        if position.y < self.floor_threshold || !position.is_finite() {
            let recovery = self.brain.first_waypoint();
            info!("{} fell out of the level, returning to {:?}", self.entity, recovery);
            physics.set_position(self.entity, recovery)?;
            physics.set_linear_velocity(self.entity, Vec3::ZERO)?;
            self.instance.position = recovery;
            return Ok(());
        }

        let yaw = self.facing_yaw();
        let config = self.perception.config();
        let eye = position + Vec3::Y * config.eye_height;
        let red_zone = config.red_zone_distance;
        let sample = self.perception.sweep(self.entity, position, yaw, &*physics);
        self.overlay = VisionOverlay::from_sample(sample, eye, yaw, red_zone);

        let observer = Observer {
            entity: self.entity,
            position,
            yaw,
        };
        let outcome = self.detector.run(&observer, world, &*physics);
        if outcome.is_spotted() {
            self.detected_locally = true;
        }
        self.last_outcome = Some(outcome);

        let situation = Situation {
            position,
            player_position: world.player_position(),
            alerted: world.is_alerted(),
        };
        let directive = self.brain.update(&situation, now, TimerOwner::Enemy(handle), timers);

        let current = physics.linear_velocity(self.entity)?;
        let velocity = match directive {
            Directive::Hold => Vec3::new(0.0, current.y, 0.0),
            Directive::MoveTo { target, speed, .. } => Seek::new(speed).velocity(position, target, current),
        };
        physics.set_linear_velocity(self.entity, velocity)?;

        let heading = horizontal(velocity);
        self.rotation = face_towards(self.rotation, heading, (self.turn_speed * dt).min(1.0));

        if let Some(tint) = self.tint.update(self.detected_locally || world.is_alerted()) {
            self.instance.tint = tint;
        }
        self.instance.position = position;
        self.instance.rotation = self.rotation;

        self.animation.apply(self.entity, directive.gait(), animations)?;
        Ok(())
    }
}
