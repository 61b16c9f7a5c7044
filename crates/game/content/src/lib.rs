//! Data-driven rules for the skirmish engine.
//!
//! Rule files are TOML documents that overlay [`game_core::GameConfig`]:
//! any table or key left out keeps its stock value. A data directory holds a
//! `rules.toml` plus optional named variants under `rules/`.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult};
