//! Game rules loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game rules from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rules from a TOML file.
    ///
    /// Missing tables and keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid rules in {}: {}", path.display(), e))
    }

    /// Parse rules from TOML text and check them for playability.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &GameConfig) -> LoadResult<()> {
        let dimensions = config.map.dimensions;
        anyhow::ensure!(
            dimensions.width >= 3 && dimensions.height >= 3,
            "map must be at least 3x3, got {}x{}",
            dimensions.width,
            dimensions.height
        );
        anyhow::ensure!(
            !config.economy.income_schedule.is_empty(),
            "income schedule must have at least one entry"
        );
        anyhow::ensure!(
            config.combat.damage_growth > 1.0,
            "damage growth must exceed 1.0, got {}",
            config.combat.damage_growth
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&config.combat.min_injury_factor),
            "min injury factor must lie in [0, 1], got {}",
            config.combat.min_injury_factor
        );
        anyhow::ensure!(
            config.abilities.fortify_turns >= 1,
            "fortify must last at least one turn"
        );
        Ok(())
    }
}
