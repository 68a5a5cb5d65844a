//! [`merge_core::StatusCatalog`] backed by an in-memory map.
use merge_core::{StatusCatalog, StatusEffectData, StatusEffectType};
use std::collections::HashMap;

/// StatusCatalog implementation with static effect definitions
#[derive(Debug, Clone, Default)]
pub struct StatusCatalogImpl {
    definitions: HashMap<StatusEffectType, StatusEffectData>,
}

impl StatusCatalogImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalog from loaded content. Later entries win.
    pub fn from_definitions(definitions: impl IntoIterator<Item = StatusEffectData>) -> Self {
        let mut catalog = Self::new();
        for data in definitions {
            catalog.add_definition(data);
        }
        catalog
    }

    /// Add a status effect definition
    pub fn add_definition(&mut self, data: StatusEffectData) {
        self.definitions.insert(data.kind, data);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl StatusCatalog for StatusCatalogImpl {
    fn status(&self, kind: StatusEffectType) -> Option<StatusEffectData> {
        self.definitions.get(&kind).cloned()
    }
}
