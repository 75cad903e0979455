//! Service configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use territory::Rules;
use tracing::{debug, info, instrument};

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "TERRITORY_LOG";

/// Configuration for the session service.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Default `tracing` filter when `RUST_LOG` is not set.
    log_filter: String,

    /// Buffer size of each session's update channel.
    notification_capacity: usize,

    /// Game rules applied to every session.
    rules: Rules,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            notification_capacity: 64,
            rules: Rules::default(),
        }
    }
}

impl ServerConfig {
    /// Creates a configuration around explicit rules.
    pub fn with_rules(rules: Rules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(rounds = *config.rules.rounds(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from `path` if given, otherwise uses defaults, then applies
    /// the [`LOG_ENV`] override.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_log_override(std::env::var(LOG_ENV).ok()))
    }

    /// Replaces the log filter when an override is present.
    pub fn with_log_override(mut self, filter: Option<String>) -> Self {
        if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.rules
            .validate()
            .map_err(|e| ConfigError::new(e.to_string()))?;
        if self.notification_capacity == 0 {
            return Err(ConfigError::new(
                "notification_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
