//! Configuration management for spangapp.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "spangapp";

/// Default database file name, relative to the working directory.
const DATABASE_FILE_NAME: &str = "spacing_angels.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SPANGAPP_`)
/// 2. TOML config file at `~/.config/spangapp/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
    /// Statistics configuration.
    pub statistics: StatisticsConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the radar database file.
    /// Defaults to `spacing_angels.db` in the working directory.
    pub database_path: Option<PathBuf>,
}

/// Chart-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Width of the cumulative-distance chart, in pixels.
    pub width: u32,
    /// Height of the cumulative-distance chart, in pixels.
    pub height: u32,
}

/// Statistics-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Number of bins in the mean-speed histogram.
    pub speed_bins: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 400,
        }
    }
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self { speed_bins: 20 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `SPANGAPP_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("SPANGAPP_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "chart dimensions must be greater than 0 (got {}x{})",
                    self.chart.width, self.chart.height
                ),
            });
        }

        if self.statistics.speed_bins == 0 {
            return Err(Error::ConfigValidation {
                message: "speed_bins must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.chart.width, 700);
        assert_eq!(config.chart.height, 400);
        assert_eq!(config.statistics.speed_bins, 20);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_chart_width() {
        let mut config = Config::default();
        config.chart.width = 0;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("chart dimensions"));
    }

    #[test]
    fn test_validate_zero_speed_bins() {
        let mut config = Config::default();
        config.statistics.speed_bins = 0;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("speed_bins"));
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        assert_eq!(config.database_path(), PathBuf::from("spacing_angels.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/data/radar.db"));

        assert_eq!(config.database_path(), PathBuf::from("/data/radar.db"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("spangapp"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("speed_bins"));
        assert!(json.contains("width"));
    }

    #[test]
    fn test_chart_config_deserialize() {
        let json = r#"{"width": 1024, "height": 768}"#;
        let chart: ChartConfig = serde_json::from_str(json).unwrap();
        assert_eq!(chart.width, 1024);
        assert_eq!(chart.height, 768);
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
