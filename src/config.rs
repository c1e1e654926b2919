use std::path::Path;

use log::warn;

use crate::error::ConfigError;
use crate::game::GameConfig;
use crate::store::StoreConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let game = &self.game;
        if game.rows == 0 {
            return Err(ConfigError::Validation("game.rows must be >= 1".into()));
        }
        if game.cols == 0 {
            return Err(ConfigError::Validation("game.cols must be >= 1".into()));
        }
        if game.rows * game.cols < 2 {
            return Err(ConfigError::Validation(
                "game board must have at least 2 cells".into(),
            ));
        }
        if game.win_tile < 4 || !game.win_tile.is_power_of_two() {
            return Err(ConfigError::Validation(
                "game.win_tile must be a power of two >= 4".into(),
            ));
        }
        if !(0.0..=1.0).contains(&game.four_probability) {
            return Err(ConfigError::Validation(
                "game.four_probability must be in [0, 1]".into(),
            ));
        }
        if self.store.save_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "store.save_path must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
