//! Configuration Loader
//!
//! Loads and validates the replay configuration from a TOML file.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::strategy::params::{MovingAverageType, PairConfig};

/// Environment variable overriding `replay.feed_path`
pub const FEED_PATH_ENV: &str = "STATARB_FEED_PATH";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub replay: ReplaySection,
    #[serde(default)]
    pub paper: PaperSection,
    #[serde(default)]
    pub pairs: Vec<PairSection>,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Replay configuration section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplaySection {
    /// JSON Lines file of daily bars
    #[serde(default)]
    pub feed_path: Option<String>,
    /// First date replayed (inclusive)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last date replayed (inclusive)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ReplaySection {
    /// Get feed path with environment variable override
    /// Checks STATARB_FEED_PATH first, falls back to config value; `~` is expanded
    pub fn get_feed_path(&self) -> Option<PathBuf> {
        std::env::var(FEED_PATH_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .or_else(|| self.feed_path.clone())
            .map(|p| PathBuf::from(shellexpand::tilde(&p).into_owned()))
    }
}

/// Paper execution section
#[derive(Debug, Clone, Deserialize)]
pub struct PaperSection {
    /// Capital used to turn weights into notional amounts
    #[serde(default = "default_capital")]
    pub capital: f64,
}

impl Default for PaperSection {
    fn default() -> Self {
        Self {
            capital: default_capital(),
        }
    }
}

/// One `[[pairs]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct PairSection {
    /// Instrument whose price is the spread's positive term
    pub leg_1: String,
    /// Instrument scaled by the hedge ratio
    pub leg_2: String,
    pub hedge_ratio: f64,
    #[serde(default = "default_band_window")]
    pub band_window: usize,
    #[serde(default = "default_band_multiplier")]
    pub band_multiplier: f64,
    #[serde(default = "default_volatility_window")]
    pub volatility_window: usize,
    #[serde(default)]
    pub moving_average: MovingAverageType,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_capital() -> f64 {
    100_000.0
}

fn default_band_window() -> usize {
    PairConfig::DEFAULT_BAND_WINDOW
}

fn default_band_multiplier() -> f64 {
    PairConfig::DEFAULT_BAND_MULTIPLIER
}

fn default_volatility_window() -> usize {
    PairConfig::DEFAULT_VOLATILITY_WINDOW
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pairs.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one [[pairs]] entry is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for section in &self.pairs {
            let pair = PairConfig::from(section);
            pair.validate().map_err(|e| {
                ConfigError::ValidationError(format!("pair {}: {}", pair.id(), e))
            })?;
            if !seen.insert(pair.id()) {
                return Err(ConfigError::ValidationError(format!(
                    "pair {} is configured more than once",
                    pair.id()
                )));
            }
        }

        if let (Some(start), Some(end)) = (self.replay.start_date, self.replay.end_date) {
            if start > end {
                return Err(ConfigError::ValidationError(format!(
                    "start_date {} is after end_date {}",
                    start, end
                )));
            }
        }

        if !self.paper.capital.is_finite() || self.paper.capital <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "paper capital must be > 0, got {}",
                self.paper.capital
            )));
        }

        Ok(())
    }

    /// Strategy parameters for every configured pair, in file order
    pub fn pair_configs(&self) -> Vec<PairConfig> {
        self.pairs.iter().map(PairConfig::from).collect()
    }
}

impl From<&PairSection> for PairConfig {
    fn from(section: &PairSection) -> Self {
        PairConfig::new(section.leg_1.clone(), section.leg_2.clone(), section.hedge_ratio)
            .with_band(section.band_window, section.band_multiplier)
            .with_volatility_window(section.volatility_window)
            .with_moving_average(section.moving_average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[logging]
level = "debug"

[replay]
feed_path = "data/bars.jsonl"
start_date = "2023-12-10"
end_date = "2024-09-10"

[paper]
capital = 250000.0

[[pairs]]
leg_1 = "DIS"
leg_2 = "MRK"
hedge_ratio = 0.356
band_window = 120
band_multiplier = 0.6
volatility_window = 120
moving_average = "exponential"

[[pairs]]
leg_1 = "AMZN"
leg_2 = "MPC"
hedge_ratio = 1.1
moving_average = "simple"
"#
        .to_string()
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.paper.capital, 250_000.0);
        assert_eq!(config.replay.start_date, NaiveDate::from_ymd_opt(2023, 12, 10));
        assert_eq!(config.replay.end_date, NaiveDate::from_ymd_opt(2024, 9, 10));
        assert_eq!(config.pairs.len(), 2);
        assert_eq!(config.pairs[0].hedge_ratio, 0.356);
        assert_eq!(config.pairs[0].moving_average, MovingAverageType::Exponential);
    }

    #[test]
    fn test_pair_defaults_applied() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();
        let amzn = &config.pairs[1];

        assert_eq!(amzn.band_window, PairConfig::DEFAULT_BAND_WINDOW);
        assert_eq!(amzn.band_multiplier, PairConfig::DEFAULT_BAND_MULTIPLIER);
        assert_eq!(amzn.volatility_window, PairConfig::DEFAULT_VOLATILITY_WINDOW);
        assert_eq!(amzn.moving_average, MovingAverageType::Simple);
    }

    #[test]
    fn test_config_to_pair_configs() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();
        let pairs = config.pair_configs();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].id(), "DIS/MRK");
        assert_eq!(pairs[0].band_window, 120);
        assert_eq!(pairs[0].band_multiplier, 0.6);
        assert_eq!(pairs[1].id(), "AMZN/MPC");
        assert_eq!(pairs[1].hedge_ratio, 1.1);
    }

    #[test]
    fn test_optional_sections_default() {
        let file = write_config(
            r#"
[[pairs]]
leg_1 = "DIS"
leg_2 = "MRK"
hedge_ratio = 0.356
"#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.paper.capital, 100_000.0);
        assert!(config.replay.feed_path.is_none());
        assert!(config.replay.start_date.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/pairs.toml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[[pairs]]\nleg_1 = DIS\n");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ParseError(_)
        ));
    }

    #[test]
    fn test_unknown_moving_average_rejected() {
        let file = write_config(
            r#"
[[pairs]]
leg_1 = "DIS"
leg_2 = "MRK"
hedge_ratio = 0.356
moving_average = "hull"
"#,
        );
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ParseError(_)
        ));
    }

    #[test]
    fn test_no_pairs() {
        let file = write_config("[paper]\ncapital = 1000.0\n");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_invalid_band_window() {
        let file = write_config(
            r#"
[[pairs]]
leg_1 = "DIS"
leg_2 = "MRK"
hedge_ratio = 0.356
band_window = 0
"#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("DIS/MRK")));
    }

    #[test]
    fn test_invalid_multiplier() {
        let file = write_config(
            r#"
[[pairs]]
leg_1 = "DIS"
leg_2 = "MRK"
hedge_ratio = 0.356
band_multiplier = -0.6
"#,
        );
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_identical_legs() {
        let file = write_config(
            r#"
[[pairs]]
leg_1 = "DIS"
leg_2 = "DIS"
hedge_ratio = 1.0
"#,
        );
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_duplicate_pairs() {
        let file = write_config(
            r#"
[[pairs]]
leg_1 = "DIS"
leg_2 = "MRK"
hedge_ratio = 0.356

[[pairs]]
leg_1 = "DIS"
leg_2 = "MRK"
hedge_ratio = 0.4
"#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("more than once")));
    }

    #[test]
    fn test_inverted_date_window() {
        let file = write_config(
            r#"
[replay]
start_date = "2024-09-10"
end_date = "2023-12-10"

[[pairs]]
leg_1 = "DIS"
leg_2 = "MRK"
hedge_ratio = 0.356
"#,
        );
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_invalid_capital() {
        let file = write_config(
            r#"
[paper]
capital = 0.0

[[pairs]]
leg_1 = "DIS"
leg_2 = "MRK"
hedge_ratio = 0.356
"#,
        );
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_feed_path_expansion_and_override() {
        let replay = ReplaySection {
            feed_path: Some("~/bars.jsonl".to_string()),
            ..ReplaySection::default()
        };

        // Both cases run in one test so the environment is never raced
        std::env::remove_var(FEED_PATH_ENV);
        let path = replay.get_feed_path().unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("bars.jsonl"));

        std::env::set_var(FEED_PATH_ENV, "/tmp/override.jsonl");
        assert_eq!(replay.get_feed_path(), Some(PathBuf::from("/tmp/override.jsonl")));
        std::env::remove_var(FEED_PATH_ENV);

        assert!(ReplaySection::default().get_feed_path().is_none());
    }
}
