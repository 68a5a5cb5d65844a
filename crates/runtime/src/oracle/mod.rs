//! Runtime wrappers around static game content oracles.
//!
//! These implementations expose `merge-core` catalog traits and bundle them,
//! together with the optional presentation collaborators, into an
//! [`OracleManager`] so the runtime can build [`CombatEnv`] snapshots on
//! demand. The catalogs are immutable at runtime; combat state lives in the
//! coordinator.
mod random;
mod stages;
mod statuses;

use merge_content::ContentBundle;
use merge_core::{AudioSink, CombatEnv, MapRenderer, MergeArena, StatusPresenter};
use std::fmt;
use std::sync::Arc;

pub use random::StdRandom;
pub use stages::StageCatalogImpl;
pub use statuses::StatusCatalogImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) statuses: Arc<StatusCatalogImpl>,
    pub(crate) stages: Arc<StageCatalogImpl>,
    presenter: Option<Arc<dyn StatusPresenter>>,
    audio: Option<Arc<dyn AudioSink>>,
    arena: Option<Arc<dyn MergeArena>>,
    renderer: Option<Arc<dyn MapRenderer>>,
}

impl OracleManager {
    /// Creates a new oracle manager without presentation collaborators
    pub fn new(statuses: Arc<StatusCatalogImpl>, stages: Arc<StageCatalogImpl>) -> Self {
        Self {
            statuses,
            stages,
            presenter: None,
            audio: None,
            arena: None,
            renderer: None,
        }
    }

    /// Builds the catalogs from loaded content.
    pub fn from_content(content: &ContentBundle) -> Self {
        Self::new(
            Arc::new(StatusCatalogImpl::from_definitions(content.statuses.iter().cloned())),
            Arc::new(StageCatalogImpl::new(content.stages.clone())),
        )
    }

    pub fn with_presenter(mut self, presenter: Arc<dyn StatusPresenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn with_audio(mut self, audio: Arc<dyn AudioSink>) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_arena(mut self, arena: Arc<dyn MergeArena>) -> Self {
        self.arena = Some(arena);
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn MapRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Borrows every configured oracle as a [`CombatEnv`].
    pub fn env(&self) -> CombatEnv<'_> {
        let mut env = CombatEnv::empty()
            .with_statuses(self.statuses.as_ref())
            .with_stages(self.stages.as_ref());
        if let Some(presenter) = self.presenter.as_deref() {
            env = env.with_presenter(presenter);
        }
        if let Some(audio) = self.audio.as_deref() {
            env = env.with_audio(audio);
        }
        if let Some(arena) = self.arena.as_deref() {
            env = env.with_arena(arena);
        }
        if let Some(renderer) = self.renderer.as_deref() {
            env = env.with_renderer(renderer);
        }
        env
    }

    pub fn statuses(&self) -> &StatusCatalogImpl {
        &self.statuses
    }

    pub fn stages(&self) -> &StageCatalogImpl {
        &self.stages
    }
}

impl fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleManager")
            .field("statuses", &self.statuses.len())
            .field("presenter", &self.presenter.is_some())
            .field("audio", &self.audio.is_some())
            .field("arena", &self.arena.is_some())
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
