//! Stage catalog loader.

use std::path::Path;

use merge_core::StageData;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/stages.ron");

/// Stage catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageCatalogFile {
    pub stages: Vec<StageData>,
}

/// Loader for stage weights and visuals.
///
/// Catalog order is preserved: it decides the weighted draw buckets and the
/// fallback stage for degenerate weights.
pub struct StageLoader;

impl StageLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StageData>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<StageData>> {
        let catalog: StageCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stage catalog RON: {}", e))?;
        if catalog.stages.is_empty() {
            tracing::warn!(target: "content::stages", "stage catalog is empty; every cell will be Undefined");
        }
        Ok(catalog.stages)
    }

    pub fn embedded() -> LoadResult<Vec<StageData>> {
        Self::parse(EMBEDDED)
    }
}
