//! Content factory for locating rule files in a data directory.

use std::path::{Path, PathBuf};

use game_core::GameConfig;

use crate::loaders::{ConfigLoader, LoadResult};

/// Loads rule files from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// └── rules/
///     ├── large.toml
///     └── garrison.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the default rules from `rules.toml`, or the stock rules when the
    /// file does not exist.
    pub fn load_rules(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a named variant from `rules/{name}.toml`.
    pub fn load_variant(&self, name: &str) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("rules").join(format!("{}.toml", name));
        ConfigLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
