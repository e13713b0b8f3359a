//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/lovelens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/lovelens/` (~/.config/lovelens/)
//! - State/Logs: `$XDG_STATE_HOME/lovelens/` (~/.local/state/lovelens/)

use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Analytics tuning
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Keyword table overrides
    #[serde(default)]
    pub lexicon: Lexicon,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalyticsConfig {
    /// Size of the longest/shortest message listings
    #[serde(default = "default_top_messages")]
    pub top_messages: usize,

    /// Messages must be longer than this (in characters) to be listed
    #[serde(default = "default_min_highlight_length")]
    pub min_highlight_length: usize,

    /// Messages shorter than this are candidates for the shortest listing
    #[serde(default = "default_short_message_limit")]
    pub short_message_limit: usize,

    /// Gaps of this many minutes or more are not counted as responses
    #[serde(default = "default_max_response_gap_minutes")]
    pub max_response_gap_minutes: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_messages: default_top_messages(),
            min_highlight_length: default_min_highlight_length(),
            short_message_limit: default_short_message_limit(),
            max_response_gap_minutes: default_max_response_gap_minutes(),
        }
    }
}

impl AnalyticsConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.top_messages == 0 {
            return Err(Error::Config(
                "analytics.top_messages must be at least 1".to_string(),
            ));
        }
        if self.min_highlight_length >= self.short_message_limit {
            return Err(Error::Config(format!(
                "analytics.min_highlight_length ({}) must be below analytics.short_message_limit ({})",
                self.min_highlight_length, self.short_message_limit
            )));
        }
        if self.max_response_gap_minutes <= 0 {
            return Err(Error::Config(
                "analytics.max_response_gap_minutes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_top_messages() -> usize {
    5
}

fn default_min_highlight_length() -> usize {
    10
}

fn default_short_message_limit() -> usize {
    50
}

fn default_max_response_gap_minutes() -> i64 {
    24 * 60
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.analytics.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/lovelens/config.toml` (~/.config/lovelens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("lovelens").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/lovelens/` (~/.local/state/lovelens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("lovelens")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/lovelens/lovelens.log` (~/.local/state/lovelens/lovelens.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("lovelens.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analytics.top_messages, 5);
        assert_eq!(config.analytics.min_highlight_length, 10);
        assert_eq!(config.analytics.short_message_limit, 50);
        assert_eq!(config.analytics.max_response_gap_minutes, 1440);
        assert_eq!(config.logging.level, "info");
        assert!(config.analytics.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analytics]
top_messages = 10

[logging]
level = "debug"

[lexicon]
night_greetings = ["shubh ratri"]
"#;
        let config = Config::from_toml(toml).unwrap();

        assert_eq!(config.analytics.top_messages, 10);
        assert_eq!(config.analytics.short_message_limit, 50);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.lexicon.night_greetings, vec!["shubh ratri"]);
        assert_eq!(
            config.lexicon.morning_greetings,
            Lexicon::default().morning_greetings
        );
    }

    #[test]
    fn test_analytics_validation() {
        let config = AnalyticsConfig {
            top_messages: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyticsConfig {
            min_highlight_length: 60,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyticsConfig {
            max_response_gap_minutes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let err = Config::from_toml("[analytics]\ntop_messages = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_toml("[analytics\n").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_paths() {
        assert!(Config::config_path().ends_with("lovelens/config.toml"));
        assert!(Config::log_path().ends_with("lovelens/lovelens.log"));
    }
}
