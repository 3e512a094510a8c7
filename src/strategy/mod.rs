//! Strategy Layer - Volatility-band mean reversion on a hedged spread
//!
//! Per pair:
//! - Spread = leg 1 - hedge_ratio * leg 2
//! - Band = moving average +/- k standard deviations of the spread
//! - Enter long the spread below the lower band, short above the upper band
//! - Exit when the spread crosses back over the middle
//! - Size each leg inversely to its price volatility
//!
//! `StrategyRunner` drives any number of independent pairs.

pub mod error;
pub mod indicators;
pub mod pair_state;
pub mod params;
pub mod runner;
pub mod sizer;
pub mod spread;

pub use error::SignalError;
pub use indicators::{BandLevels, ExponentialStat, RollingStat, StreamingStat, VolatilityBand};
pub use pair_state::PairState;
pub use params::{ConfigError, MovingAverageType, PairConfig};
pub use runner::{StrategyRunner, TickReport};
pub use sizer::PositionSizer;
pub use spread::SpreadSeries;
