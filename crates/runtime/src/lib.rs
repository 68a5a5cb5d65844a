//! Async orchestration of merge battles.
//!
//! This crate wires the synchronous rules of `merge-core` to a clock, an event
//! bus and in-memory oracles built from `merge-content`. Consumers build a
//! [`TurnCoordinator`] per battle, feed it player attacks and elapsed time,
//! and await its turn-end resolution.
//!
//! Modules are organized by responsibility:
//! - [`coordinator`] hosts the battle phase machine and its builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`events`] provides topic-based event bus for combat events
//! - [`clock`] abstracts the pauses between turn-end effects
//! - [`oracle`] provides catalog adapters and the collaborator bundle
pub mod api;
pub mod clock;
pub mod config;
pub mod coordinator;
pub mod events;
pub mod oracle;

pub use api::{Result, RuntimeError};
pub use clock::{Clock, ImmediateClock, TokioClock};
pub use config::RuntimeConfig;
pub use coordinator::{
    AttackReport, BattlePhase, BattleSummary, CancelHandle, CoordinatorBuilder, RunReport,
    TickReport, TurnCoordinator, TurnEndSummary,
};
pub use events::{CombatEvent, EventBus, Topic};
pub use oracle::{OracleManager, StageCatalogImpl, StatusCatalogImpl, StdRandom};
