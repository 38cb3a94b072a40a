//! Shared visual templates and per-actor instance records

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Mesh and skeleton shared by every actor of one kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterTemplate {
    pub mesh: String,
    pub skeleton: String,
    /// Clips the skeleton was authored with
    pub clips: Vec<&'static str>,
}

impl CharacterTemplate {
    pub fn new(mesh: impl Into<String>, skeleton: impl Into<String>, clips: &[&'static str]) -> Self {
        Self {
            mesh: mesh.into(),
            skeleton: skeleton.into(),
            clips: clips.to_vec(),
        }
    }

    pub fn player() -> Self {
        Self::new("player.glb", "player_rig", &["idle", "crouch", "walk", "run", "jump", "dash"])
    }

    pub fn guard() -> Self {
        Self::new("guard.glb", "guard_rig", &["idle", "walk", "run"])
    }
}

/// Two-colour alert tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tint {
    Neutral,
    Alert,
}

impl Tint {
    pub fn from_alert(alert: bool) -> Self {
        if alert {
            Self::Alert
        } else {
            Self::Neutral
        }
    }

    /// Linear RGB multiplier
    pub fn rgb(&self) -> [f32; 3] {
        match self {
            Self::Neutral => [1.0, 1.0, 1.0],
            Self::Alert => [1.0, 0.25, 0.2],
        }
    }
}

/// Per-actor render record referencing a shared template
#[derive(Debug, Clone)]
pub struct CharacterInstance {
    pub template: Arc<CharacterTemplate>,
    pub position: Vec3,
    pub rotation: Quat,
    pub tint: Tint,
}

impl CharacterInstance {
    pub fn new(template: Arc<CharacterTemplate>) -> Self {
        Self {
            template,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            tint: Tint::Neutral,
        }
    }
}

/// Reports the tint only when the alert condition flips
#[derive(Debug, Clone, Default)]
pub struct TintTracker {
    last: Option<Tint>,
}

impl TintTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, alert: bool) -> Option<Tint> {
        let tint = Tint::from_alert(alert);
        if self.last == Some(tint) {
            return None;
        }
        self.last = Some(tint);
        Some(tint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_changes_once() {
        let mut tracker = TintTracker::new();
        assert_eq!(tracker.update(false), Some(Tint::Neutral));
        assert_eq!(tracker.update(false), None);
        assert_eq!(tracker.update(true), Some(Tint::Alert));
        assert_eq!(tracker.update(true), None);
    }

    #[test]
    fn test_instances_share_template() {
        let template = Arc::new(CharacterTemplate::guard());
        let a = CharacterInstance::new(Arc::clone(&template));
        let mut b = CharacterInstance::new(Arc::clone(&template));
        b.tint = Tint::Alert;

        assert!(Arc::ptr_eq(&a.template, &b.template));
        assert_eq!(Arc::strong_count(&template), 3);
        assert_ne!(a.tint, b.tint);
    }
}
