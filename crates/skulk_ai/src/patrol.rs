//! Enemy behaviour: patrol, wait, pursue
//!
//! ```text
//!            arrived (< arrival radius)
//!   Patrol ───────────────────────────▶ Waiting
//!     ▲                                    │
//!     └──── wait timer fired, index+1 ─────┘
//!
//!   Patrol | Waiting ── alert raised ──▶ Pursuing (terminal)
//! ```

use crate::state_machine::{State, StateMachine};
use crate::steering::horizontal;
use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use skulk_core::{Scheduler, SimError, SimTime, TimerId, TimerKind};

fn default_arrival_radius() -> f32 {
    0.5
}

fn default_wait_seconds() -> f64 {
    2.0
}

fn default_patrol_speed() -> f32 {
    2.0
}

fn default_pursuit_speed() -> f32 {
    4.5
}

/// Patrol tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolConfig {
    /// Horizontal distance at which a waypoint counts as reached
    #[serde(default = "default_arrival_radius")]
    pub arrival_radius: f32,

    /// Pause at each waypoint, seconds
    #[serde(default = "default_wait_seconds")]
    pub wait_seconds: f64,

    #[serde(default = "default_patrol_speed")]
    pub patrol_speed: f32,

    #[serde(default = "default_pursuit_speed")]
    pub pursuit_speed: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            arrival_radius: default_arrival_radius(),
            wait_seconds: default_wait_seconds(),
            patrol_speed: default_patrol_speed(),
            pursuit_speed: default_pursuit_speed(),
        }
    }
}

/// Behaviour states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    Patrol,
    Waiting,
    Pursuing,
}

impl State for EnemyState {}

/// Locomotion style, mapped to an animation by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gait {
    Idle,
    Walk,
    Run,
}

/// What the enemy should do this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    /// Stand still
    Hold,
    /// Steer towards `target` at `speed`
    MoveTo { target: Vec3, speed: f32, gait: Gait },
}

impl Directive {
    pub fn gait(&self) -> Gait {
        match self {
            Self::Hold => Gait::Idle,
            Self::MoveTo { gait, .. } => *gait,
        }
    }
}

/// Inputs for one behaviour update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    pub position: Vec3,
    pub player_position: Vec3,
    pub alerted: bool,
}

struct Context {
    alerted: bool,
    waypoint_distance: f32,
    wait_elapsed: bool,
}

/// Per-enemy behaviour controller
pub struct PatrolBrain {
    fsm: StateMachine<EnemyState, Context>,
    config: PatrolConfig,
    waypoints: Vec<Vec3>,
    index: usize,
    wait_timer: Option<TimerId>,
    wait_elapsed: bool,
}

impl PatrolBrain {
    /// A route needs at least one waypoint
    pub fn new(waypoints: Vec<Vec3>, config: PatrolConfig) -> skulk_core::Result<Self> {
        if waypoints.is_empty() {
            return Err(SimError::Degenerate("patrol route has no waypoints"));
        }

        let mut fsm = StateMachine::new(EnemyState::Patrol);
        fsm.add_global_transition(EnemyState::Pursuing, |ctx: &Context| ctx.alerted);
        let radius = config.arrival_radius;
        fsm.add_transition(EnemyState::Patrol, EnemyState::Waiting, move |ctx: &Context| {
            ctx.waypoint_distance < radius
        });
        fsm.add_transition(EnemyState::Waiting, EnemyState::Patrol, |ctx: &Context| ctx.wait_elapsed);

        Ok(Self {
            fsm,
            config,
            waypoints,
            index: 0,
            wait_timer: None,
            wait_elapsed: false,
        })
    }

    pub fn state(&self) -> EnemyState {
        self.fsm.current()
    }

    pub fn config(&self) -> &PatrolConfig {
        &self.config
    }

    pub fn waypoint_index(&self) -> usize {
        self.index
    }

    pub fn current_waypoint(&self) -> Vec3 {
        self.waypoints[self.index]
    }

    /// Recovery point after falling out of the level
    pub fn first_waypoint(&self) -> Vec3 {
        self.waypoints[0]
    }

    /// Pending wait timer, if any
    pub fn wait_timer(&self) -> Option<TimerId> {
        self.wait_timer
    }

    /// Deliver a fired timer. Ids other than the pending wait are stale and
    /// ignored.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.wait_timer == Some(id) {
            self.wait_timer = None;
            self.wait_elapsed = true;
            true
        } else {
            debug!("Ignoring stale timer {:?}", id);
            false
        }
    }

    /// Advance the state machine and produce this step's directive
    pub fn update<K: Copy + PartialEq>(
        &mut self,
        situation: &Situation,
        now: SimTime,
        owner: K,
        timers: &mut Scheduler<K>,
    ) -> Directive {
        let context = Context {
            alerted: situation.alerted,
            waypoint_distance: horizontal(self.current_waypoint() - situation.position).length(),
            wait_elapsed: self.wait_elapsed,
        };

        if let Some((from, to)) = self.fsm.update(&context) {
            self.enter(from, to, now, owner, timers);
        }

        match self.fsm.current() {
            EnemyState::Patrol => Directive::MoveTo {
                target: self.current_waypoint(),
                speed: self.config.patrol_speed,
                gait: Gait::Walk,
            },
            EnemyState::Waiting => Directive::Hold,
            EnemyState::Pursuing => Directive::MoveTo {
                target: situation.player_position,
                speed: self.config.pursuit_speed,
                gait: Gait::Run,
            },
        }
    }

    fn enter<K: Copy + PartialEq>(
        &mut self,
        from: EnemyState,
        to: EnemyState,
        now: SimTime,
        owner: K,
        timers: &mut Scheduler<K>,
    ) {
        match to {
            EnemyState::Waiting => {
                let id = timers.schedule_after(owner, TimerKind::WaypointWait, now, self.config.wait_seconds);
                self.wait_timer = Some(id);
                self.wait_elapsed = false;
            }
            EnemyState::Patrol => {
                self.index = (self.index + 1) % self.waypoints.len();
                self.wait_elapsed = false;
            }
            EnemyState::Pursuing => {
                if let Some(id) = self.wait_timer.take() {
                    timers.cancel(id);
                }
                info!("Enemy switched from {:?} to pursuit", from);
            }
        }
    }
}
