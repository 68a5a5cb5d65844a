//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::StatusEffectType;

use super::StageKind;

/// Required read-only data is missing.
///
/// Presentation collaborators never produce these: a missing presenter, audio
/// sink or arena is skipped silently. Only catalogs the rules cannot work
/// without are reported.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("status catalog not available")]
    StatusCatalogNotAvailable,

    #[error("stage catalog not available")]
    StageCatalogNotAvailable,

    #[error("no catalog entry for status effect '{0}'")]
    StatusNotFound(StatusEffectType),

    #[error("no catalog entry for stage '{0}'")]
    StageNotFound(StageKind),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            StatusCatalogNotAvailable | StageCatalogNotAvailable => ErrorSeverity::Fatal,
            StatusNotFound(_) | StageNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            StatusCatalogNotAvailable => "ORACLE_STATUS_CATALOG_NOT_AVAILABLE",
            StageCatalogNotAvailable => "ORACLE_STAGE_CATALOG_NOT_AVAILABLE",
            StatusNotFound(_) => "ORACLE_STATUS_NOT_FOUND",
            StageNotFound(_) => "ORACLE_STAGE_NOT_FOUND",
        }
    }
}
