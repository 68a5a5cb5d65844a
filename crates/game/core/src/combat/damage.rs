//! Results of damage and heal applications.

use crate::state::EntityId;

/// Outcome of one damage application on one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    pub target: EntityId,
    /// Damage before incoming modifiers.
    pub requested: u32,
    /// Damage after Invincible and Shield.
    pub dealt: u32,
    /// Health actually lost (capped by remaining health).
    pub applied: u32,
    /// Whether this hit brought the target to zero health.
    pub lethal: bool,
}

impl DamageResult {
    /// Damage that modifiers prevented.
    pub fn prevented(&self) -> u32 {
        self.requested - self.dealt
    }
}

/// Outcome of one heal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealResult {
    pub target: EntityId,
    pub requested: u32,
    /// Health actually restored (capped by max health).
    pub applied: u32,
}
