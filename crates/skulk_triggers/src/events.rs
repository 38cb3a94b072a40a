//! Trigger events

use crate::system::TriggerId;
use serde::{Deserialize, Serialize};
use skulk_core::EntityId;

/// Type of trigger event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEventType {
    /// Occupant started overlapping the volume
    Enter,
    /// Occupant stopped overlapping the volume
    Exit,
}

/// A trigger event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub event_type: TriggerEventType,
    pub trigger: TriggerId,
    pub other: EntityId,
}

impl TriggerEvent {
    pub fn enter(trigger: TriggerId, other: EntityId) -> Self {
        Self {
            event_type: TriggerEventType::Enter,
            trigger,
            other,
        }
    }

    pub fn exit(trigger: TriggerId, other: EntityId) -> Self {
        Self {
            event_type: TriggerEventType::Exit,
            trigger,
            other,
        }
    }

    pub fn is_enter(&self) -> bool {
        self.event_type == TriggerEventType::Enter
    }

    pub fn is_exit(&self) -> bool {
        self.event_type == TriggerEventType::Exit
    }
}
