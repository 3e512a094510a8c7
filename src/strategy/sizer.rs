//! Inverse-volatility position sizing.
//!
//! Each leg receives the other leg's share of total volatility, so the
//! calmer instrument carries the larger weight:
//!
//! ```text
//! w1 = vol_2 / (vol_1 + vol_2)
//! w2 = vol_1 / (vol_1 + vol_2)
//! ```

use crate::domain::{PortfolioTarget, PositionRegime, TargetAllocation};
use crate::strategy::error::SignalError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PositionSizer;

impl PositionSizer {
    /// Normalized leg weights; both in (0, 1), summing to 1
    pub fn weights(vol_1: f64, vol_2: f64) -> Result<(f64, f64), SignalError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(vol_1) || !valid(vol_2) {
            return Err(SignalError::InvalidVolatility { vol_1, vol_2 });
        }
        let total = vol_1 + vol_2;
        Ok((vol_2 / total, vol_1 / total))
    }

    /// Signed targets for entering `regime`.
    ///
    /// Long the spread is (+w1 leg 1, -w2 leg 2); short is the negation.
    /// Flat has no allocation and yields `None`.
    pub fn allocation(
        regime: PositionRegime,
        leg_1: &str,
        leg_2: &str,
        vol_1: f64,
        vol_2: f64,
    ) -> Result<Option<TargetAllocation>, SignalError> {
        let (w1, w2) = Self::weights(vol_1, vol_2)?;
        let sign = regime.direction();
        if sign == 0.0 {
            return Ok(None);
        }
        Ok(Some(TargetAllocation::new(vec![
            PortfolioTarget::new(leg_1, sign * w1),
            PortfolioTarget::new(leg_2, -sign * w2),
        ])))
    }
}
