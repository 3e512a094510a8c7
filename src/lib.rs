//! statarb-pairs - Volatility-band pairs trading library
//!
//! Tracks the spread `price_1 - h * price_2` between two instruments, trades
//! it back toward a moving average when it leaves a volatility band, and sizes
//! each leg inversely to its own volatility.
//!
//! # Modules
//!
//! - `domain`: Bars, regimes, allocations and indicator snapshots
//! - `ports`: Trait abstractions (BarFeed, ExecutionPort, TelemetryPort)
//! - `strategy`: Rolling statistics, bands, sizing and the pair state machine
//! - `adapters`: JSON Lines feed, paper execution, telemetry sinks, CLI
//! - `config`: Configuration loading and validation
//! - `application`: Replay orchestrator

pub mod domain;
pub mod ports;
pub mod strategy;
pub mod adapters;
pub mod config;
pub mod application;
