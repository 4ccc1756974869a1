use crate::error::{config_error, env_error, ExtractResult};
use crate::extractor::Strategy;
use chrono::Duration;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Config file read when `EVENT_CONFIG_FILE` is not set
pub const DEFAULT_CONFIG_FILE: &str = "config/extractor.toml";
/// Default duration of an event without an explicit end, in minutes
pub const DEFAULT_DURATION_MINUTES: i64 = 60;
/// Longest accepted default duration: one year
pub const MAX_DURATION_MINUTES: i64 = 366 * 24 * 60;
/// Default tracing filter; quiet so stdout carries only the record
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime configuration for the extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extraction pipeline to run
    pub strategy: Strategy,
    /// Duration used to derive `end` from `start`
    pub default_duration_minutes: i64,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment.
    ///
    /// Environment variables win over the file, the file wins over defaults.
    pub fn load() -> ExtractResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let path = env::var("EVENT_CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut config = Self::from_file(Path::new(&path))?;

        if let Ok(strategy) = env::var("EVENT_STRATEGY") {
            config.strategy = strategy
                .parse::<Strategy>()
                .map_err(|e: String| env_error("EVENT_STRATEGY", &e))?;
        }

        if let Ok(minutes) = env::var("EVENT_DEFAULT_DURATION_MINUTES") {
            config.default_duration_minutes = minutes
                .trim()
                .parse::<i64>()
                .map_err(|e| env_error("EVENT_DEFAULT_DURATION_MINUTES", &e.to_string()))?;
        }

        if let Ok(filter) = env::var("EVENT_LOG") {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file, falling back to defaults when it does not exist
    pub fn from_file(path: &Path) -> ExtractResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(content: &str) -> ExtractResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> ExtractResult<()> {
        let minutes = self.default_duration_minutes;
        if minutes <= 0 {
            return Err(config_error(&format!(
                "default_duration_minutes must be positive, got {}",
                minutes
            )));
        }
        if minutes > MAX_DURATION_MINUTES || Duration::try_minutes(minutes).is_none() {
            return Err(config_error(&format!(
                "default_duration_minutes must be at most {}, got {}",
                MAX_DURATION_MINUTES, minutes
            )));
        }
        Ok(())
    }

    /// Duration used to derive `end`; out-of-range values fall back to the default
    pub fn default_duration(&self) -> Duration {
        Duration::try_minutes(self.default_duration_minutes)
            .filter(|_| (1..=MAX_DURATION_MINUTES).contains(&self.default_duration_minutes))
            .unwrap_or_else(|| Duration::minutes(DEFAULT_DURATION_MINUTES))
    }
}
