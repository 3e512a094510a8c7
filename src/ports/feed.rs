use thiserror::Error;

use crate::domain::MarketSnapshot;

/// Bar feed error type
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to read feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Snapshot on line {line} is not after the previous one ({timestamp})")]
    OutOfOrder { line: usize, timestamp: String },

    #[error("Bar for {instrument} on line {line} has a non-positive or non-finite price")]
    InvalidBar { line: usize, instrument: String },
}

/// Source of market snapshots in strictly increasing time order
#[cfg_attr(test, mockall::automock)]
pub trait BarFeed {
    /// Next snapshot, or `Ok(None)` once the feed is exhausted
    fn next_snapshot(&mut self) -> Result<Option<MarketSnapshot>, FeedError>;
}
