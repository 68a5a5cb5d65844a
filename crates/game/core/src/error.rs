//! Common error infrastructure for merge-core.
//!
//! Domain errors (`OracleError`, `RosterError`, `EventError`) live next to the
//! code that produces them and implement [`GameError`] so callers can classify
//! failures uniformly.
//!
//! Most malformed-content conditions in combat are not errors at all: they are
//! logged and skipped so a turn can always complete. The types here cover the
//! cases where a caller asked for something that cannot be done.

use crate::state::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: may succeed later or with a different choice
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the caller cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: option not yet affordable, resolution still in progress.
    Recoverable,

    /// Examples: unknown action name, option index out of range.
    Validation,

    /// Examples: roster and battle state disagree about an entity.
    Internal,

    /// Examples: required catalog missing.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Entity involved in the failure (if applicable).
    pub entity: Option<EntityId>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entity: None,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all merge-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; it is used by logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }

    #[test]
    fn context_builder_keeps_fields() {
        let ctx = ErrorContext::new()
            .with_entity(EntityId(3))
            .with_message("shock chain");
        assert_eq!(ctx.entity, Some(EntityId(3)));
        assert_eq!(ctx.message, Some("shock chain"));
    }
}
