//! Collaborators the rules consult or notify.
//!
//! Catalogs expose read-only data (status timings, stage weights). Presenters,
//! audio, the merge arena and the map renderer receive side effects. The
//! [`CombatEnv`] aggregate bundles them so the engine works against whatever
//! subset the caller could provide.
mod error;
mod presenter;
mod rng;
mod stages;
mod status;

use crate::state::StatusEffectType;

pub use error::OracleError;
pub use presenter::{AudioSink, MapRenderer, MergeArena, StatusPresenter};
pub use rng::{PcgRng, RandomSource, compute_seed};
pub use stages::{StageCatalog, StageData, StageKind};
pub use status::{StatusCatalog, StatusEffectData, StatusTiming};

/// Borrowed collaborators available to the engine.
///
/// Every slot is optional. Missing presentation collaborators are skipped;
/// a missing status catalog makes every effect an unknown kind.
#[derive(Clone, Copy, Default)]
pub struct CombatEnv<'a> {
    statuses: Option<&'a dyn StatusCatalog>,
    stages: Option<&'a dyn StageCatalog>,
    presenter: Option<&'a dyn StatusPresenter>,
    audio: Option<&'a dyn AudioSink>,
    arena: Option<&'a dyn MergeArena>,
    renderer: Option<&'a dyn MapRenderer>,
}

impl<'a> CombatEnv<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_statuses(mut self, statuses: &'a dyn StatusCatalog) -> Self {
        self.statuses = Some(statuses);
        self
    }

    #[must_use]
    pub fn with_stages(mut self, stages: &'a dyn StageCatalog) -> Self {
        self.stages = Some(stages);
        self
    }

    #[must_use]
    pub fn with_presenter(mut self, presenter: &'a dyn StatusPresenter) -> Self {
        self.presenter = Some(presenter);
        self
    }

    #[must_use]
    pub fn with_audio(mut self, audio: &'a dyn AudioSink) -> Self {
        self.audio = Some(audio);
        self
    }

    #[must_use]
    pub fn with_arena(mut self, arena: &'a dyn MergeArena) -> Self {
        self.arena = Some(arena);
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: &'a dyn MapRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Returns the status catalog, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::StatusCatalogNotAvailable` if none was provided.
    pub fn statuses(&self) -> Result<&'a dyn StatusCatalog, OracleError> {
        self.statuses.ok_or(OracleError::StatusCatalogNotAvailable)
    }

    /// Returns the stage catalog, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::StageCatalogNotAvailable` if none was provided.
    pub fn stages(&self) -> Result<&'a dyn StageCatalog, OracleError> {
        self.stages.ok_or(OracleError::StageCatalogNotAvailable)
    }

    pub fn presenter(&self) -> Option<&'a dyn StatusPresenter> {
        self.presenter
    }

    pub fn audio(&self) -> Option<&'a dyn AudioSink> {
        self.audio
    }

    pub fn arena(&self) -> Option<&'a dyn MergeArena> {
        self.arena
    }

    pub fn renderer(&self) -> Option<&'a dyn MapRenderer> {
        self.renderer
    }

    /// Catalog entry for `kind`. Logs and returns `None` on a miss.
    pub fn status_data(&self, kind: StatusEffectType) -> Option<StatusEffectData> {
        let data = self
            .statuses
            .and_then(|catalog| catalog.status(kind));
        if data.is_none() {
            tracing::warn!(
                target: "core::env",
                kind = %kind,
                "status effect has no catalog entry; skipping its trigger"
            );
        }
        data
    }

    /// Unknown kinds count as non-permanent.
    pub fn is_permanent(&self, kind: StatusEffectType) -> bool {
        self.statuses
            .is_some_and(|catalog| catalog.is_permanent(kind))
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("statuses", &self.statuses.is_some())
            .field("stages", &self.stages.is_some())
            .field("presenter", &self.presenter.is_some())
            .field("audio", &self.audio.is_some())
            .field("arena", &self.arena.is_some())
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
