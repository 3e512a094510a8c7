//! Price bars and per-timestamp market snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Daily price observation for a single instrument
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(open: f64, close: f64) -> Self {
        Self { open, close }
    }

    /// Both prices finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.open.is_finite() && self.close.is_finite() && self.open > 0.0 && self.close > 0.0
    }
}

/// All bars delivered for one timestamp, keyed by instrument id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub bars: HashMap<String, Bar>,
}

impl MarketSnapshot {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            bars: HashMap::new(),
        }
    }

    /// Builder-style insert, handy for feeds and tests
    pub fn with_bar(mut self, instrument: impl Into<String>, bar: Bar) -> Self {
        self.bars.insert(instrument.into(), bar);
        self
    }

    /// Bar for `instrument`, if it traded at this timestamp
    pub fn bar(&self, instrument: &str) -> Option<&Bar> {
        self.bars.get(instrument)
    }

    pub fn contains(&self, instrument: &str) -> bool {
        self.bars.contains_key(instrument)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bar_validation() {
        assert!(Bar::new(100.0, 101.0).is_valid());
        assert!(!Bar::new(0.0, 101.0).is_valid());
        assert!(!Bar::new(100.0, f64::NAN).is_valid());
        assert!(!Bar::new(100.0, -1.0).is_valid());
    }

    #[test]
    fn test_snapshot_lookup() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let snapshot = MarketSnapshot::new(ts)
            .with_bar("DIS", Bar::new(90.0, 91.0))
            .with_bar("MRK", Bar::new(105.0, 104.5));

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains("DIS"));
        assert!(!snapshot.contains("AMZN"));
        assert_eq!(snapshot.bar("MRK").map(|b| b.close), Some(104.5));
    }

    #[test]
    fn test_snapshot_deserialize() {
        let json = r#"{"timestamp":"2024-01-02T00:00:00Z","bars":{"DIS":{"open":90.1,"close":91.0}}}"#;
        let snapshot: MarketSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.bar("DIS"), Some(&Bar::new(90.1, 91.0)));
        assert_eq!(snapshot.timestamp, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }
}
