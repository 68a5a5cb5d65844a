//! Content loaders for reading game data from files.
//!
//! Every loader can parse a file from disk (`load`), a string (`parse`), or
//! the copy embedded in the binary at build time (`embedded`).

pub mod config;
pub mod events;
pub mod factory;
pub mod stages;
pub mod statuses;

pub use config::ConfigLoader;
pub use events::{EventCatalog, EventDef, EventLoader, OptionDef};
pub use factory::{ContentBundle, ContentFactory};
pub use stages::{StageCatalogFile, StageLoader};
pub use statuses::{StatusCatalogFile, StatusLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
