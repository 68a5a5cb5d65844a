//! Deterministic combat and map rules for the merge battler.
//!
//! `merge-core` holds the synchronous rules: combatant state and status
//! stacks, the status effect resolution engine, attack targeting, the stage
//! map generator and the stage event model. Catalog data and presentation
//! hooks come in through the collaborator traits in [`env`]; the async turn
//! coordinator lives in the runtime crate.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod map;
pub mod state;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use combat::{AttackType, DamageResult, HealResult};
pub use config::{GameConfig, MapConfig};
pub use env::{
    AudioSink, CombatEnv, MapRenderer, MergeArena, OracleError, PcgRng, RandomSource,
    StageCatalog, StageData, StageKind, StatusCatalog, StatusEffectData, StatusPresenter,
    StatusTiming, compute_seed,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use event::{
    ActionArgs, ActionCall, ActionRegistry, Availability, ConsumptionPolicy, EventContext,
    EventError, EventSession, OptionEffect, Requirement, StageEvent, StageEventOption,
};
pub use map::{NodeId, RenderHandle, StageMap, StageNode, choose_stage};
pub use state::{
    ActorState, BattleOutcome, BattleState, Combatant, DefeatedEnemy, EnemyAttack, EnemyRoster,
    EnemyState, EntityId, Position, ResourceMeter, Reward, RosterError, RunState, Side,
    StatusEffectType, StatusStacks, Wallet,
};
pub use status::{EffectOutcome, StatusEngine, TurnEndBatch, TurnEndReport, TurnEndStep};
