use thiserror::Error;

/// Tick-time failures. All are recoverable: the affected pair skips the tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    #[error("{0} queried before its warm-up window is full")]
    NotReady(&'static str),

    #[error("Invalid volatility: vol_1={vol_1}, vol_2={vol_2} (both must be > 0)")]
    InvalidVolatility { vol_1: f64, vol_2: f64 },

    #[error("Missing bar for {instrument}")]
    MissingData { instrument: String },
}

impl SignalError {
    /// Warm-up and data gaps are expected during normal operation
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::NotReady(_) | Self::MissingData { .. })
    }
}
