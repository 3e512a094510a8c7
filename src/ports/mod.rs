//! Ports Layer - Trait definitions for external collaborators
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Bar feeds (recorded or live daily bars)
//! - Execution of target allocations and liquidations
//! - Telemetry / charting of indicator readings
//!
//! All ports are synchronous; the engine is tick-driven and never suspends.

pub mod execution;
pub mod feed;
pub mod telemetry;

pub use execution::{ExecutionError, ExecutionPort};
pub use feed::{BarFeed, FeedError};
pub use telemetry::{TelemetryError, TelemetryPort};
