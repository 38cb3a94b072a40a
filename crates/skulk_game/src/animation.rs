//! Animation state change tracking
//!
//! Controllers pick an animation state every step; the tracker compares it
//! with the previous one and only talks to the animation player when it
//! changes.

use log::{debug, warn};
use skulk_ai::Gait;
use skulk_core::{AnimationPlayer, EntityId, PlaybackSettings, SimError};
use std::collections::HashMap;

/// Cross-fade duration between states, seconds
pub const CROSS_FADE: f32 = 0.2;

/// Normalized offset one-shot clips start at, skipping the wind-up pose
pub const ONE_SHOT_OFFSET: f32 = 0.25;

/// A state that maps to a named clip
pub trait AnimationState: Copy + Eq + std::fmt::Debug {
    fn clip(&self) -> &'static str;
    fn settings(&self) -> PlaybackSettings;
}

/// Player animation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAnimation {
    Idle,
    Crouch,
    Walk,
    Run,
    Jump,
    Dash,
}

impl PlayerAnimation {
    /// Airborne states win over grounded ones
    pub fn select(airborne: bool, moving: bool, crouching: bool) -> Self {
        match (airborne, moving, crouching) {
            (true, true, false) => Self::Dash,
            (true, _, _) => Self::Jump,
            (false, true, true) => Self::Walk,
            (false, true, false) => Self::Run,
            (false, false, true) => Self::Crouch,
            (false, false, false) => Self::Idle,
        }
    }

    pub fn is_one_shot(&self) -> bool {
        matches!(self, Self::Jump | Self::Dash)
    }
}

impl AnimationState for PlayerAnimation {
    fn clip(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Crouch => "crouch",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Dash => "dash",
        }
    }

    fn settings(&self) -> PlaybackSettings {
        if self.is_one_shot() {
            PlaybackSettings::once(CROSS_FADE, ONE_SHOT_OFFSET)
        } else {
            PlaybackSettings::looping(CROSS_FADE)
        }
    }
}

impl AnimationState for Gait {
    fn clip(&self) -> &'static str {
        match self {
            Gait::Idle => "idle",
            Gait::Walk => "walk",
            Gait::Run => "run",
        }
    }

    fn settings(&self) -> PlaybackSettings {
        PlaybackSettings::looping(CROSS_FADE)
    }
}

/// Remembers the playing state and issues fade-out/fade-in on change
#[derive(Debug, Clone)]
pub struct AnimationTracker<S: AnimationState> {
    current: Option<S>,
}

impl<S: AnimationState> AnimationTracker<S> {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// Forget the playing state so the next `apply` restarts it
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Switch to `next` if it differs from the playing state.
    ///
    /// Returns `Ok(true)` when a transition was issued. A missing clip
    /// leaves the previous state recorded so the switch is retried next step.
    pub fn apply(
        &mut self,
        entity: EntityId,
        next: S,
        player: &mut dyn AnimationPlayer,
    ) -> skulk_core::Result<bool> {
        if self.current == Some(next) {
            return Ok(false);
        }

        if !player.has_clip(entity, next.clip()) {
            warn!("{} has no '{}' clip yet", entity, next.clip());
            return Err(SimError::ClipMissing {
                entity,
                clip: next.clip().to_string(),
            });
        }

        if let Some(previous) = self.current {
            player.stop(entity, previous.clip(), CROSS_FADE)?;
        }
        player.play(entity, next.clip(), next.settings())?;
        debug!("{} animation {:?} -> {:?}", entity, self.current, next);
        self.current = Some(next);
        Ok(true)
    }
}

impl<S: AnimationState> Default for AnimationTracker<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Headless animation player.
///
/// Knows which clips each rig was loaded with and keeps the active clip per
/// entity. Used by the runner when no renderer is attached.
#[derive(Debug, Default)]
pub struct ClipLibrary {
    rigs: HashMap<EntityId, Vec<&'static str>>,
    active: HashMap<EntityId, (String, PlaybackSettings)>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the clips loaded for an entity's rig
    pub fn load_rig(&mut self, entity: EntityId, clips: &[&'static str]) {
        self.rigs.insert(entity, clips.to_vec());
    }

    /// Clip currently playing on `entity`
    pub fn active(&self, entity: EntityId) -> Option<&str> {
        self.active.get(&entity).map(|(clip, _)| clip.as_str())
    }

    pub fn active_settings(&self, entity: EntityId) -> Option<PlaybackSettings> {
        self.active.get(&entity).map(|(_, settings)| *settings)
    }
}

impl AnimationPlayer for ClipLibrary {
    fn has_clip(&self, entity: EntityId, clip: &str) -> bool {
        self.rigs
            .get(&entity)
            .map(|clips| clips.iter().any(|c| *c == clip))
            .unwrap_or(false)
    }

    fn play(&mut self, entity: EntityId, clip: &str, settings: PlaybackSettings) -> skulk_core::Result<()> {
        if !self.has_clip(entity, clip) {
            return Err(SimError::ClipMissing {
                entity,
                clip: clip.to_string(),
            });
        }
        self.active.insert(entity, (clip.to_string(), settings));
        Ok(())
    }

    fn stop(&mut self, entity: EntityId, clip: &str, _fade: f32) -> skulk_core::Result<()> {
        if self.active(entity) == Some(clip) {
            self.active.remove(&entity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skulk_core::PlaybackMode;

    fn library(entity: EntityId) -> ClipLibrary {
        let mut library = ClipLibrary::new();
        library.load_rig(entity, &["idle", "crouch", "walk", "run", "jump", "dash"]);
        library
    }

    #[test]
    fn test_select_priority() {
        assert_eq!(PlayerAnimation::select(true, true, false), PlayerAnimation::Dash);
        assert_eq!(PlayerAnimation::select(true, true, true), PlayerAnimation::Jump);
        assert_eq!(PlayerAnimation::select(true, false, false), PlayerAnimation::Jump);
        assert_eq!(PlayerAnimation::select(false, true, true), PlayerAnimation::Walk);
        assert_eq!(PlayerAnimation::select(false, true, false), PlayerAnimation::Run);
        assert_eq!(PlayerAnimation::select(false, false, true), PlayerAnimation::Crouch);
        assert_eq!(PlayerAnimation::select(false, false, false), PlayerAnimation::Idle);
    }

    #[test]
    fn test_one_shot_settings() {
        let jump = PlayerAnimation::Jump.settings();
        assert_eq!(jump.mode, PlaybackMode::Once);
        assert!(jump.clamp_when_finished);
        assert_eq!(jump.start_at, ONE_SHOT_OFFSET);

        assert_eq!(PlayerAnimation::Run.settings().mode, PlaybackMode::Loop);
    }

    #[test]
    fn test_tracker_only_acts_on_change() {
        let entity = EntityId::new(1);
        let mut player = library(entity);
        let mut tracker = AnimationTracker::new();

        assert!(tracker.apply(entity, PlayerAnimation::Idle, &mut player).unwrap());
        assert!(!tracker.apply(entity, PlayerAnimation::Idle, &mut player).unwrap());
        assert!(tracker.apply(entity, PlayerAnimation::Run, &mut player).unwrap());
        assert_eq!(player.active(entity), Some("run"));
    }

    #[test]
    fn test_missing_clip_retries() {
        let entity = EntityId::new(2);
        let mut player = ClipLibrary::new();
        let mut tracker = AnimationTracker::new();

        assert!(tracker.apply(entity, Gait::Walk, &mut player).is_err());
        assert_eq!(tracker.current(), None);

        player.load_rig(entity, &["idle", "walk", "run"]);
        assert!(tracker.apply(entity, Gait::Walk, &mut player).unwrap());
        assert_eq!(tracker.current(), Some(Gait::Walk));
    }
}
