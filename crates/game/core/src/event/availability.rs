use std::fmt;
use std::sync::Arc;

use crate::state::{Combatant, StatusEffectType};

use super::EventContext;

/// Data-driven availability condition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requirement {
    MinCoins(u32),
    /// Current health strictly above the given value, so paying health can
    /// never kill the player.
    HealthAbove(u32),
    /// At least this many items in the merge arena. Without an arena the
    /// count is zero.
    MinItems(u32),
    HasStatus(StatusEffectType),
    All(Vec<Requirement>),
    Any(Vec<Requirement>),
    Not(Box<Requirement>),
}

impl Requirement {
    pub fn is_met(&self, ctx: &EventContext<'_>) -> bool {
        match self {
            Self::MinCoins(coins) => ctx.run.wallet.coins >= *coins,
            Self::HealthAbove(health) => ctx.run.player.health() > *health,
            Self::MinItems(items) => ctx.item_count() >= *items,
            Self::HasStatus(kind) => ctx.run.player.statuses.contains(*kind),
            Self::All(all) => all.iter().all(|req| req.is_met(ctx)),
            Self::Any(any) => any.iter().any(|req| req.is_met(ctx)),
            Self::Not(inner) => !inner.is_met(ctx),
        }
    }
}

/// Predicate over the current event context.
pub type AvailabilityFn = Arc<dyn Fn(&EventContext<'_>) -> bool + Send + Sync>;

/// Whether an option can be chosen right now. Evaluated on every query,
/// never cached.
#[derive(Clone, Default)]
pub enum Availability {
    #[default]
    Always,
    Requirement(Requirement),
    Custom(AvailabilityFn),
}

impl Availability {
    pub fn custom(predicate: impl Fn(&EventContext<'_>) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    pub fn is_available(&self, ctx: &EventContext<'_>) -> bool {
        match self {
            Self::Always => true,
            Self::Requirement(requirement) => requirement.is_met(ctx),
            Self::Custom(predicate) => predicate(ctx),
        }
    }
}

impl From<Requirement> for Availability {
    fn from(requirement: Requirement) -> Self {
        Self::Requirement(requirement)
    }
}

impl fmt::Debug for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Requirement(requirement) => f.debug_tuple("Requirement").field(requirement).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
