//! Strategy Runner
//!
//! Fans each market snapshot out to every configured pair, in configuration
//! order. Pairs share nothing; a fault in one never stops the others.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::domain::{IndicatorSnapshot, MarketSnapshot, PairAction, PositionRegime};
use crate::strategy::error::SignalError;
use crate::strategy::pair_state::PairState;
use crate::strategy::params::{ConfigError, PairConfig};

/// Everything produced by one tick across all pairs
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub timestamp: DateTime<Utc>,
    pub actions: Vec<PairAction>,
    /// Telemetry from every pair that had a ready tick
    pub snapshots: Vec<IndicatorSnapshot>,
    /// Unexpected per-pair failures (warm-up and data gaps are not listed)
    pub faults: Vec<(String, SignalError)>,
}

impl TickReport {
    fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            actions: Vec::new(),
            snapshots: Vec::new(),
            faults: Vec::new(),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.actions.is_empty() && self.faults.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct StrategyRunner {
    pairs: Vec<PairState>,
}

impl StrategyRunner {
    pub fn new<I>(configs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = PairConfig>,
    {
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();

        for config in configs {
            let id = config.id();
            if !seen.insert(id.clone()) {
                return Err(ConfigError::DuplicatePair(id));
            }
            pairs.push(PairState::new(config)?);
        }

        tracing::debug!("Strategy runner configured with {} pair(s)", pairs.len());
        Ok(Self { pairs })
    }

    /// Process one snapshot through every pair
    pub fn on_bars(&mut self, snapshot: &MarketSnapshot) -> TickReport {
        let mut report = TickReport::new(snapshot.timestamp);

        for pair in &mut self.pairs {
            let result = pair.on_bars(snapshot);

            let fresh_snapshot = match &result {
                Ok(_) => true,
                Err(e) => !e.is_expected(),
            };
            if fresh_snapshot {
                if let Some(s) = pair.last_snapshot() {
                    report.snapshots.push(s.clone());
                }
            }

            match result {
                Ok(Some(action)) => report.actions.push(action),
                Ok(None) => {}
                Err(e @ SignalError::MissingData { .. }) => {
                    tracing::trace!("{} skipped at {}: {}", pair.id(), snapshot.timestamp, e);
                }
                Err(e @ SignalError::NotReady(_)) => {
                    tracing::trace!("{} warming up at {}: {}", pair.id(), snapshot.timestamp, e);
                }
                Err(e @ SignalError::InvalidVolatility { .. }) => {
                    tracing::warn!("{} entry blocked at {}: {}", pair.id(), snapshot.timestamp, e);
                    report.faults.push((pair.id().to_string(), e));
                }
            }
        }

        report
    }

    pub fn pairs(&self) -> &[PairState] {
        &self.pairs
    }

    pub fn pair(&self, id: &str) -> Option<&PairState> {
        self.pairs.iter().find(|p| p.id() == id)
    }

    /// Current regime of every pair, in configuration order
    pub fn regimes(&self) -> Vec<(&str, PositionRegime)> {
        self.pairs.iter().map(|p| (p.id(), p.regime())).collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
