//! Configuration management for emprec.
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

/// Default data directory name.
const DATA_DIR_NAME: &str = "emprec";

/// Default data file name.
const DATA_FILE_NAME: &str = "data.json";

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "EMPREC_";

/// Largest supported JSON indentation.
const MAX_INDENT: usize = 16;

/// Largest accepted bar chart width, in characters.
const MAX_CHART_WIDTH: usize = 200;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `EMPREC_`, sections separated by `__`)
/// 2. TOML config file at `~/.config/emprec/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record store configuration.
    pub store: StoreConfig,
    /// Employee id generation.
    pub ids: IdConfig,
    /// Terminal rendering.
    pub display: DisplayConfig,
}

/// Record store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the JSON data file.
    /// Defaults to `~/.local/share/emprec/data.json`
    pub data_file: Option<PathBuf>,
    /// Spaces per indentation level in the data file.
    pub indent: usize,
}

/// Employee id generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    /// Letters every generated id starts with.
    pub prefix: String,
    /// Minimum number of digits after the prefix.
    pub width: usize,
}

/// Terminal rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Length in characters of the longest bar in the stats chart.
    pub chart_width: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: None, // Resolved at runtime
            indent: 4,
        }
    }
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            prefix: "EMP".to_string(),
            width: 3,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { chart_width: 40 }
    }
}

impl Config {
    /// Load configuration from all sources.
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
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let prefix = &self.ids.prefix;
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "ids.prefix must be one or more ASCII letters, got '{}'",
                    self.ids.prefix
                ),
            });
        }

        if !(1..=9).contains(&self.ids.width) {
            return Err(Error::ConfigValidation {
                message: format!("ids.width must be between 1 and 9, got {}", self.ids.width),
            });
        }

        if self.store.indent > MAX_INDENT {
            return Err(Error::ConfigValidation {
                message: format!(
                    "store.indent ({}) cannot be greater than {MAX_INDENT}",
                    self.store.indent
                ),
            });
        }

        if !(1..=MAX_CHART_WIDTH).contains(&self.display.chart_width) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "display.chart_width must be between 1 and {MAX_CHART_WIDTH}, got {}",
                    self.display.chart_width
                ),
            });
        }

        Ok(())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.store
            .data_file
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }
}
