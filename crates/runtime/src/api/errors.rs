//! Unified error types surfaced by the runtime API.
//!
//! Wraps roster and oracle failures from `merge-core` together with the
//! coordinator's own phase violations so clients can bubble them up with
//! consistent context.
use merge_core::{EntityId, ErrorSeverity, GameError, OracleError, RosterError};
use thiserror::Error;

use crate::coordinator::BattlePhase;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("battle has already ended")]
    BattleEnded,

    #[error("battle has not started")]
    NotStarted,

    #[error("coordinator requires oracles to be configured before building")]
    MissingOracles,

    #[error("coordinator requires a run state before building")]
    MissingRunState,

    #[error("turn-end resolution is in progress")]
    TurnEndInProgress,

    #[error("operation not allowed in phase {0}")]
    InvalidPhase(BattlePhase),

    #[error("turn-end resolution was cancelled")]
    Cancelled,

    #[error("{0} is not part of this battle")]
    UnknownEntity(EntityId),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Cancelled => ErrorSeverity::Recoverable,
            Self::MissingOracles | Self::MissingRunState => ErrorSeverity::Fatal,
            Self::BattleEnded
            | Self::NotStarted
            | Self::TurnEndInProgress
            | Self::InvalidPhase(_)
            | Self::UnknownEntity(_) => ErrorSeverity::Validation,
            Self::Roster(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleEnded => "RUNTIME_BATTLE_ENDED",
            Self::NotStarted => "RUNTIME_NOT_STARTED",
            Self::MissingOracles => "RUNTIME_MISSING_ORACLES",
            Self::MissingRunState => "RUNTIME_MISSING_RUN_STATE",
            Self::TurnEndInProgress => "RUNTIME_TURN_END_IN_PROGRESS",
            Self::InvalidPhase(_) => "RUNTIME_INVALID_PHASE",
            Self::Cancelled => "RUNTIME_CANCELLED",
            Self::UnknownEntity(_) => "RUNTIME_UNKNOWN_ENTITY",
            Self::Roster(err) => err.error_code(),
            Self::Oracle(err) => err.error_code(),
        }
    }
}
