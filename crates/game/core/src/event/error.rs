use crate::error::{ErrorSeverity, GameError};

/// Errors raised while presenting or executing stage event options.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("no action registered under '{0}'")]
    UnknownAction(String),

    #[error("option {index} out of range ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("option {0} is not available")]
    OptionUnavailable(usize),

    #[error("option {0} was already chosen during this visit")]
    OptionConsumed(usize),

    #[error("not enough coins: {required} required, {available} available")]
    InsufficientCoins { required: u32, available: u32 },

    #[error("action '{action}' requires argument '{argument}'")]
    MissingArgument {
        action: String,
        argument: &'static str,
    },
}

impl GameError for EventError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAction(_) | Self::MissingArgument { .. } => ErrorSeverity::Internal,
            Self::OptionOutOfRange { .. }
            | Self::OptionUnavailable(_)
            | Self::OptionConsumed(_) => ErrorSeverity::Validation,
            Self::InsufficientCoins { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAction(_) => "EVENT_UNKNOWN_ACTION",
            Self::OptionOutOfRange { .. } => "EVENT_OPTION_OUT_OF_RANGE",
            Self::OptionUnavailable(_) => "EVENT_OPTION_UNAVAILABLE",
            Self::OptionConsumed(_) => "EVENT_OPTION_CONSUMED",
            Self::InsufficientCoins { .. } => "EVENT_INSUFFICIENT_COINS",
            Self::MissingArgument { .. } => "EVENT_MISSING_ARGUMENT",
        }
    }
}
