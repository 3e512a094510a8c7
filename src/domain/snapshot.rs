use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Bar, PositionRegime};

/// Indicator readings published for charting on every ready tick.
///
/// Purely observational; nothing in the decision path reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub pair: String,
    pub spread: f64,
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
    pub leg_1: Bar,
    pub leg_2: Bar,
    pub volatility_1: f64,
    pub volatility_2: f64,
    /// Regime after this tick's decision
    pub regime: PositionRegime,
}

impl IndicatorSnapshot {
    /// Band width in spread units
    pub fn band_width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Spread position inside the band: 0 at lower, 1 at upper
    pub fn percent_b(&self) -> Option<f64> {
        let width = self.band_width();
        if width <= 0.0 {
            return None;
        }
        Some((self.spread - self.lower) / width)
    }
}
