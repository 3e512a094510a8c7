//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Feed: JSON Lines replay files and in-memory snapshots
//! - Paper: Simulated execution of target weights
//! - Telemetry: Indicator snapshot sinks
//! - CLI: Command-line argument parsing

pub mod cli;
pub mod feed;
pub mod paper;
pub mod telemetry;

pub use cli::CliApp;
pub use feed::{JsonLinesFeed, MemoryFeed};
pub use paper::{PaperExecution, PaperStats};
pub use telemetry::{JsonLinesTelemetry, TracingTelemetry};
