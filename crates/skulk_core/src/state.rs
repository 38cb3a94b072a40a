//! Shared world state
//!
//! One instance is owned by the game world and lent to every entity update.
//! Each field has a single writer: the player controller owns position,
//! crouch and jump, cover zones own `in_cover`, and only detection raises the
//! alert.

use crate::id::EntityId;
use core::sync::atomic::{AtomicU64, Ordering};
use glam::Vec3;
use log::info;

const NO_RAISER: u64 = u64::MAX;

/// One-way global alert flag.
///
/// The first successful `raise` wins; later calls are no-ops. The latch
/// never resets within a session. The raiser is the latch itself, so a
/// raised latch always reports who raised it.
#[derive(Debug)]
pub struct AlertLatch {
    raised_by: AtomicU64,
}

impl AlertLatch {
    pub fn new() -> Self {
        Self {
            raised_by: AtomicU64::new(NO_RAISER),
        }
    }

    /// Flip the latch. Returns `true` only for the caller that flipped it.
    pub fn raise(&self, by: EntityId) -> bool {
        self.raised_by
            .compare_exchange(NO_RAISER, by.raw(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_raised(&self) -> bool {
        self.raised_by.load(Ordering::Acquire) != NO_RAISER
    }

    /// Entity whose detection flipped the latch
    pub fn raised_by(&self) -> Option<EntityId> {
        match self.raised_by.load(Ordering::Acquire) {
            NO_RAISER => None,
            raw => Some(EntityId::new(raw)),
        }
    }
}

impl Default for AlertLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Player facts frozen for one enemy evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec3,
    pub crouching: bool,
    pub jumping: bool,
    pub in_cover: bool,
}

impl PlayerSnapshot {
    /// Fully hidden: crouched inside cover with feet on the ground
    pub fn is_hidden(&self) -> bool {
        self.in_cover && self.crouching && !self.jumping
    }
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            crouching: false,
            jumping: false,
            in_cover: false,
        }
    }
}

/// Facts shared between the player and every enemy
#[derive(Debug, Default)]
pub struct WorldState {
    player: PlayerSnapshot,
    alert: AlertLatch,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_position(&self) -> Vec3 {
        self.player.position
    }

    pub fn is_crouching(&self) -> bool {
        self.player.crouching
    }

    pub fn is_jumping(&self) -> bool {
        self.player.jumping
    }

    pub fn is_in_cover(&self) -> bool {
        self.player.in_cover
    }

    pub fn is_alerted(&self) -> bool {
        self.alert.is_raised()
    }

    pub fn alert(&self) -> &AlertLatch {
        &self.alert
    }

    pub fn set_player_position(&mut self, position: Vec3) {
        self.player.position = position;
    }

    pub fn set_crouching(&mut self, crouching: bool) {
        self.player.crouching = crouching;
    }

    pub fn set_jumping(&mut self, jumping: bool) {
        self.player.jumping = jumping;
    }

    pub fn set_in_cover(&mut self, in_cover: bool) {
        self.player.in_cover = in_cover;
    }

    /// Raise the global alert on behalf of `by`
    pub fn raise_alert(&self, by: EntityId) -> bool {
        let won = self.alert.raise(by);
        if won {
            info!("Alert raised by {}", by);
        }
        won
    }

    /// Copy of the player facts for one evaluation
    pub fn player_snapshot(&self) -> PlayerSnapshot {
        self.player
    }
}
