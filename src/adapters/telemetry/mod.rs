//! Telemetry sinks for indicator snapshots

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::domain::IndicatorSnapshot;
use crate::ports::{TelemetryError, TelemetryPort};

/// Emits each snapshot as a debug-level log line
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetryPort for TracingTelemetry {
    fn record(&mut self, snapshot: &IndicatorSnapshot) -> Result<(), TelemetryError> {
        debug!("{}", describe(snapshot));
        Ok(())
    }
}

/// One-line rendering of a snapshot; `%b` is omitted when the band has collapsed
fn describe(snapshot: &IndicatorSnapshot) -> String {
    let percent_b = snapshot
        .percent_b()
        .map(|b| format!(" %b={:.2}", b))
        .unwrap_or_default();
    format!(
        "{} {} | spread={:.4} band=[{:.4}, {:.4}, {:.4}]{} vol=({:.4}, {:.4}) {}",
        snapshot.timestamp.format("%Y-%m-%d"),
        snapshot.pair,
        snapshot.spread,
        snapshot.lower,
        snapshot.middle,
        snapshot.upper,
        percent_b,
        snapshot.volatility_1,
        snapshot.volatility_2,
        snapshot.regime
    )
}

/// Writes one JSON object per snapshot, suitable for charting tools
pub struct JsonLinesTelemetry<W: Write> {
    writer: W,
    written: usize,
}

impl JsonLinesTelemetry<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, TelemetryError> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| TelemetryError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesTelemetry<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Snapshots written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetryPort for JsonLinesTelemetry<W> {
    fn record(&mut self, snapshot: &IndicatorSnapshot) -> Result<(), TelemetryError> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer
            .write_all(b"\n")
            .and_then(|_| self.writer.flush())
            .map_err(|e| TelemetryError::Unavailable(e.to_string()))?;
        self.written += 1;
        Ok(())
    }
}
