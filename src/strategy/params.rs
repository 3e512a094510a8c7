//! Strategy Parameters
//!
//! Per-pair configuration for the volatility-band pairs strategy.
//! Defaults follow the reference deployment: 120-bar exponential band
//! at 0.6 standard deviations, 120-bar volatility window.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Averaging kind used by the volatility band for both its mean and its deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovingAverageType {
    Simple,
    #[default]
    Exponential,
}

impl fmt::Display for MovingAverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Exponential => write!(f, "exponential"),
        }
    }
}

/// Configuration for one traded pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairConfig {
    /// First leg (the one bought when long the spread)
    pub leg_1: String,
    /// Second leg, scaled by the hedge ratio in the spread
    pub leg_2: String,
    /// Regression slope of leg 1 on leg 2; spread = p1 - h * p2
    pub hedge_ratio: f64,
    /// Bars in the band's averaging window
    pub band_window: usize,
    /// Band half-width in standard deviations
    pub band_multiplier: f64,
    /// Bars in each leg's price volatility window
    pub volatility_window: usize,
    pub moving_average: MovingAverageType,
}

impl PairConfig {
    pub const DEFAULT_BAND_WINDOW: usize = 120;
    pub const DEFAULT_BAND_MULTIPLIER: f64 = 0.6;
    pub const DEFAULT_VOLATILITY_WINDOW: usize = 120;

    /// Create a pair config with default band and volatility parameters
    pub fn new(leg_1: impl Into<String>, leg_2: impl Into<String>, hedge_ratio: f64) -> Self {
        Self {
            leg_1: leg_1.into(),
            leg_2: leg_2.into(),
            hedge_ratio,
            band_window: Self::DEFAULT_BAND_WINDOW,
            band_multiplier: Self::DEFAULT_BAND_MULTIPLIER,
            volatility_window: Self::DEFAULT_VOLATILITY_WINDOW,
            moving_average: MovingAverageType::default(),
        }
    }

    pub fn with_band(mut self, window: usize, multiplier: f64) -> Self {
        self.band_window = window;
        self.band_multiplier = multiplier;
        self
    }

    pub fn with_volatility_window(mut self, window: usize) -> Self {
        self.volatility_window = window;
        self
    }

    pub fn with_moving_average(mut self, kind: MovingAverageType) -> Self {
        self.moving_average = kind;
        self
    }

    /// Identifier used in logs and actions, e.g. "DIS/MRK"
    pub fn id(&self) -> String {
        format!("{}/{}", self.leg_1, self.leg_2)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leg_1.trim().is_empty() || self.leg_2.trim().is_empty() {
            return Err(ConfigError::EmptyInstrument);
        }
        if self.leg_1 == self.leg_2 {
            return Err(ConfigError::IdenticalLegs(self.leg_1.clone()));
        }
        if !self.hedge_ratio.is_finite() {
            return Err(ConfigError::InvalidHedgeRatio(self.hedge_ratio));
        }
        if self.band_window == 0 {
            return Err(ConfigError::InvalidWindow {
                name: "band_window",
                value: self.band_window,
            });
        }
        if !(self.band_multiplier > 0.0) || !self.band_multiplier.is_finite() {
            return Err(ConfigError::InvalidMultiplier(self.band_multiplier));
        }
        if self.volatility_window == 0 {
            return Err(ConfigError::InvalidWindow {
                name: "volatility_window",
                value: self.volatility_window,
            });
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value} (must be > 0)")]
    InvalidWindow { name: &'static str, value: usize },
    #[error("Invalid band multiplier: {0} (must be finite and > 0)")]
    InvalidMultiplier(f64),
    #[error("Invalid hedge ratio: {0} (must be finite)")]
    InvalidHedgeRatio(f64),
    #[error("Instrument identifier cannot be empty")]
    EmptyInstrument,
    #[error("Both legs reference the same instrument: {0}")]
    IdenticalLegs(String),
    #[error("Pair configured more than once: {0}")]
    DuplicatePair(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PairConfig::new("DIS", "MRK", 0.356);
        assert_eq!(config.band_window, 120);
        assert_eq!(config.band_multiplier, 0.6);
        assert_eq!(config.volatility_window, 120);
        assert_eq!(config.moving_average, MovingAverageType::Exponential);
        assert_eq!(config.id(), "DIS/MRK");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PairConfig::new("AMZN", "MPC", 0.356)
            .with_band(20, 2.0)
            .with_volatility_window(30)
            .with_moving_average(MovingAverageType::Simple);
        assert_eq!(config.band_window, 20);
        assert_eq!(config.band_multiplier, 2.0);
        assert_eq!(config.volatility_window, 30);
        assert_eq!(config.moving_average, MovingAverageType::Simple);
    }

    #[test]
    fn test_invalid_windows() {
        let config = PairConfig::new("DIS", "MRK", 0.356).with_band(0, 0.6);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWindow { name: "band_window", value: 0 })
        ));

        let config = PairConfig::new("DIS", "MRK", 0.356).with_volatility_window(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWindow { name: "volatility_window", .. })
        ));
    }

    #[test]
    fn test_invalid_multiplier() {
        for k in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = PairConfig::new("DIS", "MRK", 0.356).with_band(120, k);
            assert!(matches!(config.validate(), Err(ConfigError::InvalidMultiplier(_))));
        }
    }

    #[test]
    fn test_hedge_ratio_any_sign() {
        assert!(PairConfig::new("DIS", "MRK", -1.7).validate().is_ok());
        assert!(PairConfig::new("DIS", "MRK", 0.0).validate().is_ok());
        assert!(matches!(
            PairConfig::new("DIS", "MRK", f64::NAN).validate(),
            Err(ConfigError::InvalidHedgeRatio(_))
        ));
    }

    #[test]
    fn test_invalid_instruments() {
        assert_eq!(
            PairConfig::new("", "MRK", 1.0).validate(),
            Err(ConfigError::EmptyInstrument)
        );
        assert_eq!(
            PairConfig::new("DIS", "DIS", 1.0).validate(),
            Err(ConfigError::IdenticalLegs("DIS".to_string()))
        );
    }
}
