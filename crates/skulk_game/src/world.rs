//! Simulation step loop
//!
//! One `step` runs, in order: due timers, the player controller, cover
//! zones, every enemy (perception, detection, behaviour), then physics.
//! A failing entity is logged and skipped; the rest of the step still runs.

use crate::backend::PhysicsBackend;
use crate::cover::CoverZones;
use crate::enemy::Enemy;
use crate::player::PlayerController;
use log::{debug, info, warn};
use skulk_core::{AnimationPlayer, Handle, HandleMap, InputSource, Scheduler, SimTime, WorldState};

/// Who a scheduled timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOwner {
    Player,
    Enemy(Handle<Enemy>),
}

/// A running level
pub struct GameWorld {
    state: WorldState,
    timers: Scheduler<TimerOwner>,
    player: PlayerController,
    enemies: HandleMap<Enemy>,
    cover: CoverZones,
    last_time: Option<SimTime>,
    frame: u64,
}

impl GameWorld {
    pub fn new(player: PlayerController, cover: CoverZones) -> Self {
        Self {
            state: WorldState::new(),
            timers: Scheduler::new(),
            player,
            enemies: HandleMap::new(),
            cover,
            last_time: None,
            frame: 0,
        }
    }

    pub fn add_enemy(&mut self, enemy: Enemy) -> Handle<Enemy> {
        self.enemies.insert(enemy)
    }

    /// Remove an enemy and cancel every timer it still has pending
    pub fn remove_enemy(&mut self, handle: Handle<Enemy>) -> Option<Enemy> {
        let enemy = self.enemies.remove(handle)?;
        let cancelled = self.timers.cancel_owner(TimerOwner::Enemy(handle));
        debug!("Removed {} and cancelled {} timers", enemy.entity(), cancelled);
        Some(enemy)
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn enemy(&self, handle: Handle<Enemy>) -> Option<&Enemy> {
        self.enemies.get(handle)
    }

    pub fn enemies(&self) -> impl Iterator<Item = (Handle<Enemy>, &Enemy)> {
        self.enemies.iter()
    }

    pub fn cover(&self) -> &CoverZones {
        &self.cover
    }

    pub fn timers(&self) -> &Scheduler<TimerOwner> {
        &self.timers
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the simulation to `now` seconds
    pub fn step<P: PhysicsBackend>(
        &mut self,
        now: SimTime,
        input: &dyn InputSource,
        physics: &mut P,
        animations: &mut dyn AnimationPlayer,
    ) {
        let dt = self.last_time.map(|last| (now - last).max(0.0) as f32).unwrap_or(0.0);
        self.last_time = Some(now);
        self.frame += 1;

        self.fire_timers(now);

        let was_alerted = self.state.is_alerted();

        if let Err(e) = self.player.update(
            now,
            dt,
            input,
            &mut self.state,
            physics,
            animations,
            &mut self.timers,
        ) {
            warn!("Skipping player this step: {}", e);
        }

        let position = self.state.player_position();
        self.cover.update(
            self.player.entity(),
            self.player.bounds_center(position),
            self.player.half_extents(),
            &mut self.state,
        );

        for (handle, enemy) in self.enemies.iter_mut() {
            if let Err(e) = enemy.update(handle, now, dt, &self.state, physics, animations, &mut self.timers) {
                warn!("Skipping {} this step: {}", enemy.entity(), e);
            }
        }

        if !was_alerted && self.state.is_alerted() {
            if let Some(by) = self.state.alert().raised_by() {
                info!("Frame {}: alert raised by {}, all enemies pursuing", self.frame, by);
            }
        }

        physics.advance(dt);
    }

    fn fire_timers(&mut self, now: SimTime) {
        for fired in self.timers.poll(now) {
            let delivered = match fired.owner {
                TimerOwner::Player => self.player.on_timer(fired.id),
                TimerOwner::Enemy(handle) => match self.enemies.get_mut(handle) {
                    Some(enemy) => enemy.on_timer(fired.id),
                    None => false,
                },
            };
            if !delivered {
                debug!("Dropped stale {:?} timer for {:?}", fired.kind, fired.owner);
            }
        }
    }
}
