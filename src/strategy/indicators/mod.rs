//! Streaming Indicators
//!
//! Incremental statistics fed one value per bar:
//! - **RollingStat**: fixed-window mean and population standard deviation
//! - **ExponentialStat**: exponentially weighted mean and deviation, seeded
//!   from a full simple window
//! - **VolatilityBand**: middle/upper/lower envelope built on either of the above

pub mod band;
pub mod exponential_stat;
pub mod rolling_stat;

pub use band::{BandLevels, VolatilityBand};
pub use exponential_stat::ExponentialStat;
pub use rolling_stat::RollingStat;

use super::error::SignalError;

/// Common interface for the mean/deviation estimators
pub trait StreamingStat {
    /// Feed the next observation
    fn update(&mut self, value: f64);

    /// True once the warm-up window is full
    fn is_ready(&self) -> bool;

    fn mean(&self) -> Result<f64, SignalError>;

    fn stdev(&self) -> Result<f64, SignalError>;

    /// Warm-up length in observations
    fn window(&self) -> usize;

    /// Drop all observations
    fn reset(&mut self);
}
