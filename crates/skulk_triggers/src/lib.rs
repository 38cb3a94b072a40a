//! Skulk Triggers - Trigger Volume System
//!
//! Static volumes that report when an occupant's bounds start or stop
//! overlapping them. Cover zones are built on top of this.
//!
//! # Example
//!
//! ```ignore
//! use skulk_triggers::prelude::*;
//!
//! let mut triggers = TriggerSystem::new();
//! let zone = triggers.register(Trigger::new(TriggerVolume::cuboid(Vec3::new(2.0, 1.0, 2.0)), center)
//!     .with_filter(TriggerFilter::layers(LayerMask::PLAYER)));
//!
//! triggers.update(&[TriggerOccupant::new(player, position, half_extents, LayerMask::PLAYER)]);
//! for event in triggers.drain_events() { /* ... */ }
//! ```

pub mod events;
pub mod filter;
pub mod system;
pub mod trigger;
pub mod volume;

pub mod prelude {
    pub use crate::events::{TriggerEvent, TriggerEventType};
    pub use crate::filter::TriggerFilter;
    pub use crate::system::{TriggerId, TriggerOccupant, TriggerSystem};
    pub use crate::trigger::Trigger;
    pub use crate::volume::TriggerVolume;
}

pub use prelude::*;
