//! Authoritative combat and run state.
//!
//! This module owns the data structures that describe combatants, their status
//! stacks, the enemy roster and the run-level wallet. The status engine and
//! the runtime coordinator mutate them; presentation layers only read them.
pub mod battle;
pub mod roster;
pub mod run;
pub mod types;

pub use battle::{BattleOutcome, BattleState};
pub use roster::{DefeatedEnemy, EnemyRoster, RosterError, RosterSnapshot};
pub use run::{RunState, Wallet};
pub use types::{
    ActorState, Combatant, EnemyAttack, EnemyState, EntityId, Position, ResourceMeter, Reward,
    Side, StatusEffectType, StatusSnapshot, StatusStacks,
};
