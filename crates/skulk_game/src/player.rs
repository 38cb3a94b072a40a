//! Player character controller
//!
//! Per step:
//!
//! 1. Fall recovery below the level floor.
//! 2. Crouch toggle on the key-down edge, resizing the capsule.
//! 3. Ground probe, suppressed while the jump cooldown is pending.
//! 4. Jump or dash-jump on the key-down edge.
//! 5. Horizontal speed by posture, facing, animation.
//! 6. Publish position and posture to the shared world state.

use crate::animation::{AnimationTracker, PlayerAnimation};
use crate::backend::PhysicsBackend;
use crate::config::PlayerConfig;
use crate::presentation::{CharacterInstance, CharacterTemplate};
use crate::world::TimerOwner;
use glam::{Quat, Vec3};
use log::{debug, info};
use skulk_ai::{face_towards, yaw_from_direction};
use skulk_core::{
    AnimationPlayer, CapsuleShape, Control, EntityId, InputSource, RayFilter, RayQuery, Raycaster, RigidBodies,
    Scheduler, SimTime, TimerId, TimerKind, WorldState,
};
use std::f32::consts::FRAC_1_SQRT_2;
use std::sync::Arc;

/// Camera-relative "forward" on the ground plane under the isometric view
pub const ISO_FORWARD: Vec3 = Vec3::new(-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2);

/// Camera-relative "right" on the ground plane under the isometric view
pub const ISO_RIGHT: Vec3 = Vec3::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2);

/// Ground probe starts this far above the capsule base
const GROUND_PROBE_LIFT: f32 = 0.05;

/// Normalized movement heading from the held direction controls
pub fn movement_heading(input: &dyn InputSource) -> Vec3 {
    let axis = |positive: Control, negative: Control| {
        input.is_down(positive) as i32 as f32 - input.is_down(negative) as i32 as f32
    };
    let forward = axis(Control::MoveForward, Control::MoveBack);
    let right = axis(Control::MoveRight, Control::MoveLeft);
    (ISO_FORWARD * forward + ISO_RIGHT * right).normalize_or_zero()
}

/// The player-controlled avatar
pub struct PlayerController {
    entity: EntityId,
    config: PlayerConfig,
    floor_threshold: f32,
    crouching: bool,
    grounded: bool,
    jumping: bool,
    cooldown: Option<TimerId>,
    rotation: Quat,
    velocity: Vec3,
    animation: AnimationTracker<PlayerAnimation>,
    instance: CharacterInstance,
}

impl PlayerController {
    pub fn new(entity: EntityId, config: PlayerConfig, floor_threshold: f32, template: Arc<CharacterTemplate>) -> Self {
        let mut instance = CharacterInstance::new(template);
        instance.position = config.spawn;
        Self {
            entity,
            config,
            floor_threshold,
            crouching: false,
            grounded: false,
            jumping: false,
            cooldown: None,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            animation: AnimationTracker::new(),
            instance,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Jump cooldown still pending
    pub fn is_cooling_down(&self) -> bool {
        self.cooldown.is_some()
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Facing yaw of the visual body
    pub fn facing_yaw(&self) -> f32 {
        yaw_from_direction(self.rotation * Vec3::Z).unwrap_or(0.0)
    }

    /// Velocity commanded on the last step
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn animation(&self) -> Option<PlayerAnimation> {
        self.animation.current()
    }

    pub fn instance(&self) -> &CharacterInstance {
        &self.instance
    }

    /// Capsule for the current posture
    pub fn capsule(&self) -> CapsuleShape {
        if self.crouching {
            self.config.crouching_capsule
        } else {
            self.config.standing_capsule
        }
    }

    /// Half extents of the capsule's bounding box
    pub fn half_extents(&self) -> Vec3 {
        let capsule = self.capsule();
        let half_height = capsule.half_height + capsule.radius;
        Vec3::new(capsule.radius, half_height, capsule.radius)
    }

    /// World-space center of the capsule given the body position
    pub fn bounds_center(&self, position: Vec3) -> Vec3 {
        position + Vec3::new(0.0, self.capsule().offset_y, 0.0)
    }

    /// Deliver a fired timer; returns whether it was this player's cooldown
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.cooldown == Some(id) {
            self.cooldown = None;
            debug!("{} jump re-armed", self.entity);
            true
        } else {
            false
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update<P: PhysicsBackend>(
        &mut self,
        now: SimTime,
        dt: f32,
        input: &dyn InputSource,
        world: &mut WorldState,
        physics: &mut P,
        animations: &mut dyn AnimationPlayer,
        timers: &mut Scheduler<TimerOwner>,
    ) -> skulk_core::Result<()> {
        let position = physics.position(self.entity)?;

        if position.y < self.floor_threshold || !position.is_finite() {
            return self.recover(physics, world, timers);
        }

        if input.just_pressed(Control::CrouchToggle) {
            self.crouching = !self.crouching;
            physics.set_capsule(self.entity, self.capsule())?;
            world.set_crouching(self.crouching);
            debug!("{} crouching: {}", self.entity, self.crouching);
        }

        if self.cooldown.is_none() {
            self.grounded = self.probe_ground(position, &*physics);
            if self.grounded && self.jumping {
                self.jumping = false;
                world.set_jumping(false);
            }
        }

        let heading = movement_heading(input);
        let moving = heading != Vec3::ZERO;

        let mut vertical = physics.linear_velocity(self.entity)?.y;
        if input.just_pressed(Control::Jump) && self.grounded && self.cooldown.is_none() {
            vertical = if moving && !self.crouching {
                self.config.dash_jump_velocity
            } else {
                self.config.jump_velocity
            };
            self.grounded = false;
            self.jumping = true;
            self.cooldown = Some(timers.schedule_after(
                TimerOwner::Player,
                TimerKind::JumpCooldown,
                now,
                self.config.jump_cooldown,
            ));
            world.set_jumping(true);
            debug!("{} jumped with {:.1}", self.entity, vertical);
        }

        let airborne = !self.grounded;
        let speed = self.horizontal_speed(airborne, moving);
        self.velocity = heading * speed + Vec3::Y * vertical;
        physics.set_linear_velocity(self.entity, self.velocity)?;

        if let Some(yaw) = moving.then(|| yaw_from_direction(heading)).flatten() {
            self.rotation = if airborne {
                Quat::from_rotation_y(yaw)
            } else {
                face_towards(self.rotation, heading, (self.config.turn_speed * dt).min(1.0))
            };
        }

        world.set_player_position(position);
        self.instance.position = position;
        self.instance.rotation = self.rotation;

        let state = PlayerAnimation::select(airborne, moving, self.crouching);
        self.animation.apply(self.entity, state, animations)?;
        Ok(())
    }

    fn horizontal_speed(&self, airborne: bool, moving: bool) -> f32 {
        match (airborne, moving, self.crouching) {
            (_, false, _) => 0.0,
            (true, true, false) => self.config.dash_speed,
            (true, true, true) => self.config.air_speed,
            (false, true, true) => self.config.walk_speed,
            (false, true, false) => self.config.run_speed,
        }
    }

    fn probe_ground<P: PhysicsBackend>(&self, position: Vec3, physics: &P) -> bool {
        let lift = self.capsule().base_y() + GROUND_PROBE_LIFT;
        let query = RayQuery::new(
            position + Vec3::Y * lift,
            Vec3::NEG_Y,
            self.config.ground_probe,
            RayFilter::ground(self.entity),
        );
        physics.cast(&query).is_some()
    }

    fn recover<P: PhysicsBackend>(
        &mut self,
        physics: &mut P,
        world: &mut WorldState,
        timers: &mut Scheduler<TimerOwner>,
    ) -> skulk_core::Result<()> {
        let spawn = self.config.spawn;
        info!("{} fell out of the level, respawning at {:?}", self.entity, spawn);

        physics.set_position(self.entity, spawn)?;
        physics.set_linear_velocity(self.entity, Vec3::ZERO)?;

        if let Some(id) = self.cooldown.take() {
            timers.cancel(id);
        }
        if self.crouching {
            self.crouching = false;
            physics.set_capsule(self.entity, self.capsule())?;
            world.set_crouching(false);
        }
        self.animation.reset();
        self.grounded = false;
        self.jumping = false;
        self.velocity = Vec3::ZERO;
        world.set_jumping(false);
        world.set_player_position(spawn);
        self.instance.position = spawn;
        Ok(())
    }
}
