//! Volatility Band
//!
//! Mean +/- k standard deviations of the spread. The averaging kind is applied
//! to both the middle line and the deviation estimate, so a `Simple` band uses
//! a windowed mean with a windowed deviation and an `Exponential` band uses the
//! exponentially weighted pair.

use serde::{Deserialize, Serialize};

use super::{ExponentialStat, RollingStat, StreamingStat};
use crate::strategy::error::SignalError;
use crate::strategy::params::{ConfigError, MovingAverageType};

/// Band levels at one point in time. `upper >= middle >= lower` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandLevels {
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
}

impl BandLevels {
    pub fn is_below(&self, value: f64) -> bool {
        value < self.lower
    }

    pub fn is_above(&self, value: f64) -> bool {
        value > self.upper
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Estimator {
    Simple(RollingStat),
    Exponential(ExponentialStat),
}

impl Estimator {
    fn as_stat(&self) -> &dyn StreamingStat {
        match self {
            Self::Simple(s) => s,
            Self::Exponential(s) => s,
        }
    }

    fn as_stat_mut(&mut self) -> &mut dyn StreamingStat {
        match self {
            Self::Simple(s) => s,
            Self::Exponential(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityBand {
    estimator: Estimator,
    multiplier: f64,
}

impl VolatilityBand {
    pub fn new(
        window: usize,
        multiplier: f64,
        kind: MovingAverageType,
    ) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::InvalidWindow {
                name: "band_window",
                value: window,
            });
        }
        if !(multiplier > 0.0) || !multiplier.is_finite() {
            return Err(ConfigError::InvalidMultiplier(multiplier));
        }

        let estimator = match kind {
            MovingAverageType::Simple => Estimator::Simple(RollingStat::new(window)?),
            MovingAverageType::Exponential => Estimator::Exponential(ExponentialStat::new(window)?),
        };

        Ok(Self {
            estimator,
            multiplier,
        })
    }

    pub fn update(&mut self, spread: f64) {
        self.estimator.as_stat_mut().update(spread);
    }

    pub fn is_ready(&self) -> bool {
        self.estimator.as_stat().is_ready()
    }

    pub fn middle(&self) -> Result<f64, SignalError> {
        self.estimator.as_stat().mean().map_err(|_| SignalError::NotReady("volatility band"))
    }

    pub fn upper(&self) -> Result<f64, SignalError> {
        self.levels().map(|b| b.upper)
    }

    pub fn lower(&self) -> Result<f64, SignalError> {
        self.levels().map(|b| b.lower)
    }

    /// All three levels from one read of the estimator
    pub fn levels(&self) -> Result<BandLevels, SignalError> {
        let stat = self.estimator.as_stat();
        if !stat.is_ready() {
            return Err(SignalError::NotReady("volatility band"));
        }
        let middle = stat.mean()?;
        let width = self.multiplier * stat.stdev()?;
        Ok(BandLevels {
            lower: middle - width,
            middle,
            upper: middle + width,
        })
    }

    pub fn kind(&self) -> MovingAverageType {
        match self.estimator {
            Estimator::Simple(_) => MovingAverageType::Simple,
            Estimator::Exponential(_) => MovingAverageType::Exponential,
        }
    }

    pub fn window(&self) -> usize {
        self.estimator.as_stat().window()
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn reset(&mut self) {
        self.estimator.as_stat_mut().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    #[test]
    fn test_simple_band_levels() {
        let mut band = VolatilityBand::new(4, 2.0, MovingAverageType::Simple).unwrap();
        for v in [2.0, 4.0, 4.0, 4.0] {
            band.update(v);
        }
        let levels = band.levels().unwrap();
        let sd = 0.75f64.sqrt();
        assert_relative_eq!(levels.middle, 3.5, epsilon = 1e-12);
        assert_relative_eq!(levels.upper, 3.5 + 2.0 * sd, epsilon = 1e-12);
        assert_relative_eq!(levels.lower, 3.5 - 2.0 * sd, epsilon = 1e-12);
        assert_eq!(band.upper().unwrap(), levels.upper);
        assert_eq!(band.lower().unwrap(), levels.lower);
    }

    #[test]
    fn test_not_ready_until_window_full() {
        for kind in [MovingAverageType::Simple, MovingAverageType::Exponential] {
            let mut band = VolatilityBand::new(5, 0.6, kind).unwrap();
            for i in 0..4 {
                band.update(i as f64);
                assert!(!band.is_ready());
                assert_eq!(band.middle(), Err(SignalError::NotReady("volatility band")));
                assert!(band.upper().is_err());
                assert!(band.lower().is_err());
            }
            band.update(4.0);
            assert!(band.is_ready(), "{} band should be ready after 5 values", kind);
        }
    }

    #[test]
    fn test_ordering_holds_for_random_input() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in [MovingAverageType::Simple, MovingAverageType::Exponential] {
            let mut band = VolatilityBand::new(20, 0.6, kind).unwrap();
            let mut spread = 10.0;
            for _ in 0..2_000 {
                spread += rng.gen_range(-1.0..1.0);
                band.update(spread);
                if let Ok(levels) = band.levels() {
                    assert!(levels.upper > levels.middle);
                    assert!(levels.middle > levels.lower);
                }
            }
        }
    }

    #[test]
    fn test_collapsed_band_on_constant_spread() {
        for kind in [MovingAverageType::Simple, MovingAverageType::Exponential] {
            let mut band = VolatilityBand::new(3, 1.5, kind).unwrap();
            for _ in 0..10 {
                band.update(8.0);
            }
            let levels = band.levels().unwrap();
            assert_eq!(levels.lower, 8.0);
            assert_eq!(levels.middle, 8.0);
            assert_eq!(levels.upper, 8.0);
        }
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            VolatilityBand::new(0, 0.6, MovingAverageType::Simple),
            Err(ConfigError::InvalidWindow { .. })
        ));
        assert!(matches!(
            VolatilityBand::new(10, 0.0, MovingAverageType::Exponential),
            Err(ConfigError::InvalidMultiplier(_))
        ));
        assert!(matches!(
            VolatilityBand::new(10, -1.0, MovingAverageType::Exponential),
            Err(ConfigError::InvalidMultiplier(_))
        ));
    }

    #[test]
    fn test_breach_helpers() {
        let levels = BandLevels { lower: 1.0, middle: 2.0, upper: 3.0 };
        assert!(levels.is_below(0.5));
        assert!(!levels.is_below(1.0));
        assert!(levels.is_above(3.5));
        assert!(!levels.is_above(3.0));
    }

    #[test]
    fn test_accessors_and_reset() {
        let mut band = VolatilityBand::new(3, 0.6, MovingAverageType::Exponential).unwrap();
        assert_eq!(band.kind(), MovingAverageType::Exponential);
        assert_eq!(band.window(), 3);
        assert_eq!(band.multiplier(), 0.6);
        for v in [1.0, 2.0, 3.0] {
            band.update(v);
        }
        assert!(band.is_ready());
        band.reset();
        assert!(!band.is_ready());
    }
}
