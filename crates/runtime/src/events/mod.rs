//! Topic-based event bus for combat events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::CombatEvent;
