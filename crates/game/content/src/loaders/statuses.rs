//! Status effect catalog loader.

use std::collections::HashSet;
use std::path::Path;

use merge_core::StatusEffectData;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/statuses.ron");

/// Status catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalogFile {
    pub statuses: Vec<StatusEffectData>,
}

/// Loader for the status effect catalog.
pub struct StatusLoader;

impl StatusLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatusEffectData>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))
    }

    /// Parses a catalog. Each kind may appear once.
    pub fn parse(content: &str) -> LoadResult<Vec<StatusEffectData>> {
        let catalog: StatusCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse status catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for data in &catalog.statuses {
            if !seen.insert(data.kind) {
                anyhow::bail!("status effect '{}' is defined twice", data.kind);
            }
        }
        Ok(catalog.statuses)
    }

    pub fn embedded() -> LoadResult<Vec<StatusEffectData>> {
        Self::parse(EMBEDDED)
    }
}
