//! [`merge_core::StageCatalog`] holding the map draw weights.
use merge_core::{StageCatalog, StageData};

/// StageCatalog implementation preserving content order.
///
/// Order matters: the weighted draw walks entries in sequence and falls
/// back to the first eligible one.
#[derive(Debug, Clone, Default)]
pub struct StageCatalogImpl {
    stages: Vec<StageData>,
}

impl StageCatalogImpl {
    pub fn new(stages: Vec<StageData>) -> Self {
        Self { stages }
    }
}

impl StageCatalog for StageCatalogImpl {
    fn stages(&self) -> Vec<StageData> {
        self.stages.clone()
    }
}
