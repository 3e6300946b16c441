//! Configuration system for StreamForge.
//!
//! Load engine configuration from TOML or YAML to switch join indexing and
//! consistency checking without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use streamforge_config::{EnvironmentMode, StreamConfig};
//!
//! let config = StreamConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!     index_joins = true
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
//! assert!(config.environment_mode.is_asserted());
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use streamforge_config::StreamConfig;
//!
//! let config = StreamConfig::load("streamforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert!(config.index_joins);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use streamforge_core::StreamError;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for StreamError {
    fn from(err: ConfigError) -> Self {
        StreamError::Config(err.to_string())
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StreamConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Answer join lookups from indexes. When false, join nodes scan.
    #[serde(default = "default_index_joins")]
    pub index_joins: bool,
}

fn default_index_joins() -> bool {
    true
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            index_joins: default_index_joins(),
        }
    }
}

impl StreamConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// describes an invalid combination of settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Turns join indexing on or off.
    pub fn with_index_joins(mut self, index_joins: bool) -> Self {
        self.index_joins = index_joins;
        self
    }

    /// Checks that the settings can be honoured together.
    ///
    /// Asserted modes cross-check index lookups against scans, so they
    /// need indexing on.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.environment_mode.is_asserted() && !self.index_joins {
            return Err(ConfigError::Invalid(format!(
                "environment mode {:?} checks join indexes, but index_joins is false",
                self.environment_mode
            )));
        }
        Ok(self)
    }
}

/// Environment mode affecting engine behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Reproducible mode with deterministic behavior.
    Reproducible,

    /// Fast assert mode with basic assertions.
    FastAssert,

    /// Full assert mode with comprehensive assertions.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true for the modes that cross-check incremental state.
    pub fn is_asserted(self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }
}
