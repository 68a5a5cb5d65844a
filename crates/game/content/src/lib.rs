//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Status effect catalog (timings, permanence, sounds)
//! - Stage catalog (map draw weights and visuals)
//! - Stage events (options, requirements, registered actions)
//! - Game configuration (TOML)
//!
//! Every file has an embedded default compiled in with `include_str!`.
//! Content is consumed by runtime oracles and never appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, EventLoader, LoadResult, StageLoader,
    StatusLoader,
};
