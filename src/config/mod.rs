//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::{QUALIFICATION_RATIO, STREAK_WINDOW, TOP_N, WIN_SCORE_WEIGHT};
use crate::fetch::SheetSource;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Where the match sheet comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Local CSV export of the sheet.
    #[serde(default = "default_sheet_path")]
    pub path: PathBuf,

    /// Remote CSV endpoint; takes precedence over `path` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn default_sheet_path() -> PathBuf {
    PathBuf::from("./data/league.csv")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_sheet_path(),
            url: None,
        }
    }
}

impl SourceConfig {
    pub fn sheet_source(&self) -> SheetSource {
        match &self.url {
            Some(url) => SheetSource::Remote(url.clone()),
            None => SheetSource::File(self.path.clone()),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Engine tuning. The defaults are the league's house rules; they rarely
/// change but are deliberate configuration rather than magic numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Share of filtered matches a player must have played to rank.
    #[serde(default = "default_qualification_ratio")]
    pub qualification_ratio: f64,

    /// Recent results shown per player.
    #[serde(default = "default_streak_window")]
    pub streak_window: usize,

    /// Entries per top list.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Per-win weight in the team-generation score.
    #[serde(default = "default_win_score_weight")]
    pub win_score_weight: f64,
}

fn default_qualification_ratio() -> f64 {
    QUALIFICATION_RATIO
}

fn default_streak_window() -> usize {
    STREAK_WINDOW
}

fn default_top_n() -> usize {
    TOP_N
}

fn default_win_score_weight() -> f64 {
    WIN_SCORE_WEIGHT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            qualification_ratio: default_qualification_ratio(),
            streak_window: default_streak_window(),
            top_n: default_top_n(),
            win_score_weight: default_win_score_weight(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.engine.qualification_ratio) {
            return Err(ConfigError::ValidationError(
                "Qualification ratio must be between 0 and 1".to_string(),
            ));
        }

        if self.engine.streak_window == 0 {
            return Err(ConfigError::ValidationError(
                "Streak window must be greater than 0".to_string(),
            ));
        }

        if self.engine.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "Top list size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.source.path, PathBuf::from("./data/league.csv"));
        assert_eq!(config.source.url, None);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_engine_defaults_are_house_rules() {
        let engine = EngineConfig::default();

        assert_eq!(engine.qualification_ratio, 0.25);
        assert_eq!(engine.streak_window, 5);
        assert_eq!(engine.top_n, 5);
        assert_eq!(engine.win_score_weight, 1.5);
    }

    #[test]
    fn test_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_bad_ratio() {
        let mut config = AppConfig::default();
        config.engine.qualification_ratio = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_url_takes_precedence() {
        let mut config = AppConfig::default();
        assert!(matches!(
            config.source.sheet_source(),
            SheetSource::File(_)
        ));

        config.source.url = Some("https://example.com/league.csv".to_string());
        assert!(matches!(
            config.source.sheet_source(),
            SheetSource::Remote(_)
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.engine.streak_window, config.engine.streak_window);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [source]
            url = "https://example.com/sheet.csv"

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(parsed.server.port, 9000);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.engine.top_n, 5);
        assert!(parsed.validate().is_ok());
    }
}
