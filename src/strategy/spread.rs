//! Hedged spread between two legs: `price_1 - hedge_ratio * price_2`.

use crate::strategy::error::SignalError;

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadSeries {
    hedge_ratio: f64,
    latest: Option<(f64, f64)>,
}

impl SpreadSeries {
    pub fn new(hedge_ratio: f64) -> Self {
        Self {
            hedge_ratio,
            latest: None,
        }
    }

    /// Record the latest price of each leg
    pub fn update(&mut self, price_1: f64, price_2: f64) {
        self.latest = Some((price_1, price_2));
    }

    /// Current spread value; fails until both legs have been observed
    pub fn current(&self) -> Result<f64, SignalError> {
        self.latest
            .map(|(p1, p2)| p1 - self.hedge_ratio * p2)
            .ok_or(SignalError::NotReady("spread series"))
    }

    pub fn latest_prices(&self) -> Option<(f64, f64)> {
        self.latest
    }

    pub fn hedge_ratio(&self) -> f64 {
        self.hedge_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spread_value() {
        let mut spread = SpreadSeries::new(0.356);
        spread.update(91.0, 104.5);
        assert_relative_eq!(spread.current().unwrap(), 91.0 - 0.356 * 104.5, epsilon = 1e-12);
        assert_eq!(spread.latest_prices(), Some((91.0, 104.5)));
    }

    #[test]
    fn test_recomputed_on_each_update() {
        let mut spread = SpreadSeries::new(2.0);
        spread.update(10.0, 3.0);
        assert_eq!(spread.current().unwrap(), 4.0);
        spread.update(10.0, 6.0);
        assert_eq!(spread.current().unwrap(), -2.0);
    }

    #[test]
    fn test_negative_hedge_ratio() {
        let mut spread = SpreadSeries::new(-0.5);
        spread.update(10.0, 4.0);
        assert_eq!(spread.current().unwrap(), 12.0);
    }

    #[test]
    fn test_not_ready_before_first_update() {
        let spread = SpreadSeries::new(1.0);
        assert_eq!(spread.current(), Err(SignalError::NotReady("spread series")));
        assert_eq!(spread.hedge_ratio(), 1.0);
    }
}
