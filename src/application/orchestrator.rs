//! Replay Orchestrator
//!
//! Drives a bar feed through the strategy runner and routes what comes out:
//! allocation and liquidation instructions go to the execution port, indicator
//! snapshots go to telemetry. Port failures are logged and counted; only an
//! unreadable feed stops the replay.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::{MarketSnapshot, PairAction, PositionRegime};
use crate::ports::{BarFeed, ExecutionPort, FeedError, TelemetryPort};
use crate::strategy::{StrategyRunner, TickReport};

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Feed error: {0}")]
    FeedError(#[from] FeedError),
}

/// Totals for a replay
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    /// Snapshots processed
    pub ticks: u64,
    pub entries: u64,
    pub exits: u64,
    /// Entries blocked by unusable volatility
    pub faults: u64,
    /// Feed lines rejected as malformed, out of order or carrying invalid prices
    pub skipped: u64,
    pub execution_errors: u64,
    pub telemetry_errors: u64,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
    /// Regime of every pair when the replay ended
    pub final_regimes: BTreeMap<String, PositionRegime>,
}

pub struct ReplayOrchestrator<F, E, T>
where
    F: BarFeed,
    E: ExecutionPort,
    T: TelemetryPort,
{
    runner: StrategyRunner,
    feed: F,
    execution: E,
    telemetry: T,
    summary: ReplaySummary,
}

impl<F, E, T> ReplayOrchestrator<F, E, T>
where
    F: BarFeed,
    E: ExecutionPort,
    T: TelemetryPort,
{
    pub fn new(runner: StrategyRunner, feed: F, execution: E, telemetry: T) -> Self {
        Self {
            runner,
            feed,
            execution,
            telemetry,
            summary: ReplaySummary::default(),
        }
    }

    /// Replay the feed until it is exhausted
    pub fn run(&mut self) -> Result<ReplaySummary, OrchestratorError> {
        tracing::info!("Starting replay with {} pair(s)", self.runner.len());

        loop {
            match self.feed.next_snapshot() {
                Ok(Some(snapshot)) => {
                    self.tick(&snapshot);
                }
                Ok(None) => break,
                Err(e @ FeedError::Io(_)) => {
                    tracing::error!("Replay aborted: {}", e);
                    return Err(e.into());
                }
                Err(e) => {
                    tracing::warn!("Skipping feed line: {}", e);
                    self.summary.skipped += 1;
                }
            }
        }

        self.summary.final_regimes = self
            .runner
            .regimes()
            .into_iter()
            .map(|(id, regime)| (id.to_string(), regime))
            .collect();

        tracing::info!(
            "Replay finished: {} ticks, {} entries, {} exits",
            self.summary.ticks,
            self.summary.entries,
            self.summary.exits
        );
        Ok(self.summary.clone())
    }

    /// Process one snapshot and dispatch its results
    pub fn tick(&mut self, snapshot: &MarketSnapshot) -> TickReport {
        let report = self.runner.on_bars(snapshot);

        self.summary.ticks += 1;
        self.summary.first_timestamp.get_or_insert(snapshot.timestamp);
        self.summary.last_timestamp = Some(snapshot.timestamp);
        self.summary.faults += report.faults.len() as u64;

        for action in &report.actions {
            match action {
                PairAction::Allocate { .. } => self.summary.entries += 1,
                PairAction::Liquidate { .. } => self.summary.exits += 1,
            }
            if let Err(e) = self.execution.submit(action) {
                tracing::error!("{} execution failed: {}", action.pair(), e);
                self.summary.execution_errors += 1;
            }
        }

        for indicator in &report.snapshots {
            if let Err(e) = self.telemetry.record(indicator) {
                tracing::error!("{} telemetry failed: {}", indicator.pair, e);
                self.summary.telemetry_errors += 1;
            }
        }

        report
    }

    pub fn runner(&self) -> &StrategyRunner {
        &self.runner
    }

    pub fn execution(&self) -> &E {
        &self.execution
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    pub fn summary(&self) -> &ReplaySummary {
        &self.summary
    }

    /// Consume the orchestrator and return its adapters
    pub fn into_parts(self) -> (StrategyRunner, F, E, T) {
        (self.runner, self.feed, self.execution, self.telemetry)
    }
}
