use thiserror::Error;

use crate::domain::IndicatorSnapshot;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Telemetry sink unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Side channel for charting indicator readings; never affects decisions
#[cfg_attr(test, mockall::automock)]
pub trait TelemetryPort {
    fn record(&mut self, snapshot: &IndicatorSnapshot) -> Result<(), TelemetryError>;
}

impl<T: TelemetryPort + ?Sized> TelemetryPort for Box<T> {
    fn record(&mut self, snapshot: &IndicatorSnapshot) -> Result<(), TelemetryError> {
        (**self).record(snapshot)
    }
}
