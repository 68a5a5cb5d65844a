//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use merge_core::{ActionRegistry, GameConfig, StageData, StageEvent, StatusEffectData};

use crate::loaders::{ConfigLoader, EventLoader, LoadResult, StageLoader, StatusLoader};

/// Every piece of content a run needs.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub statuses: Vec<StatusEffectData>,
    pub stages: Vec<StageData>,
    pub events: Vec<StageEvent>,
}

impl ContentBundle {
    /// Content compiled into the crate.
    pub fn embedded(registry: &ActionRegistry) -> LoadResult<Self> {
        Ok(Self {
            config: ConfigLoader::embedded()?,
            statuses: StatusLoader::embedded()?,
            stages: StageLoader::embedded()?,
            events: EventLoader::embedded(registry)?,
        })
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── statuses.ron
/// ├── stages.ron
/// └── events.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the status effect catalog from `statuses.ron`.
    pub fn load_statuses(&self) -> LoadResult<Vec<StatusEffectData>> {
        StatusLoader::load(&self.data_dir.join("statuses.ron"))
    }

    /// Load the stage catalog from `stages.ron`.
    pub fn load_stages(&self) -> LoadResult<Vec<StageData>> {
        StageLoader::load(&self.data_dir.join("stages.ron"))
    }

    /// Load stage events from `events.ron`.
    pub fn load_events(&self, registry: &ActionRegistry) -> LoadResult<Vec<StageEvent>> {
        EventLoader::load(&self.data_dir.join("events.ron"), registry)
    }

    /// Loads every file. Missing files fall back to the embedded copy;
    /// malformed files are errors.
    pub fn load_all(&self, registry: &ActionRegistry) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: self.or_embedded("config.toml", || self.load_config(), ConfigLoader::embedded)?,
            statuses: self.or_embedded("statuses.ron", || self.load_statuses(), StatusLoader::embedded)?,
            stages: self.or_embedded("stages.ron", || self.load_stages(), StageLoader::embedded)?,
            events: self.or_embedded(
                "events.ron",
                || self.load_events(registry),
                || EventLoader::embedded(registry),
            )?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn or_embedded<T>(
        &self,
        file: &str,
        load: impl FnOnce() -> LoadResult<T>,
        embedded: impl FnOnce() -> LoadResult<T>,
    ) -> LoadResult<T> {
        if self.data_dir.join(file).is_file() {
            return load();
        }
        tracing::debug!(target: "content::factory", file, "file missing; using embedded content");
        embedded()
    }
}
