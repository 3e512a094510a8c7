use std::collections::VecDeque;

use crate::domain::MarketSnapshot;
use crate::ports::{BarFeed, FeedError};

/// Feed backed by snapshots already in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
    snapshots: VecDeque<MarketSnapshot>,
}

impl MemoryFeed {
    pub fn new(snapshots: Vec<MarketSnapshot>) -> Self {
        Self {
            snapshots: snapshots.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.snapshots.len()
    }
}

impl From<Vec<MarketSnapshot>> for MemoryFeed {
    fn from(snapshots: Vec<MarketSnapshot>) -> Self {
        Self::new(snapshots)
    }
}

impl BarFeed for MemoryFeed {
    fn next_snapshot(&mut self) -> Result<Option<MarketSnapshot>, FeedError> {
        Ok(self.snapshots.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_drains_in_order() {
        let a = MarketSnapshot::new(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
        let b = MarketSnapshot::new(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());
        let mut feed = MemoryFeed::from(vec![a.clone(), b.clone()]);

        assert_eq!(feed.remaining(), 2);
        assert_eq!(feed.next_snapshot().unwrap(), Some(a));
        assert_eq!(feed.next_snapshot().unwrap(), Some(b));
        assert_eq!(feed.next_snapshot().unwrap(), None);
    }
}
