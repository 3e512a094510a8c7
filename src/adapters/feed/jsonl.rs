//! JSON Lines bar feed
//!
//! One market snapshot per line:
//!
//! ```text
//! {"timestamp":"2024-01-02T00:00:00Z","bars":{"DIS":{"open":90.1,"close":91.0},"MRK":{"open":104.0,"close":104.5}}}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Timestamps must be
//! strictly increasing and every price finite and positive; an optional date
//! window trims the replay.

use chrono::{DateTime, NaiveDate, Utc};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::domain::MarketSnapshot;
use crate::ports::{BarFeed, FeedError};

pub struct JsonLinesFeed<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    last_timestamp: Option<DateTime<Utc>>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl JsonLinesFeed<BufReader<File>> {
    /// Open a feed file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FeedError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesFeed<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            last_timestamp: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Only replay snapshots dated within `[start, end]` (inclusive, UTC dates)
    pub fn with_window(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Lines consumed so far
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> BarFeed for JsonLinesFeed<R> {
    fn next_snapshot(&mut self) -> Result<Option<MarketSnapshot>, FeedError> {
        while let Some(line) = self.lines.next() {
            let line = line?;
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let snapshot: MarketSnapshot =
                serde_json::from_str(trimmed).map_err(|e| FeedError::Parse {
                    line: self.line_no,
                    message: e.to_string(),
                })?;

            if let Some((instrument, _)) = snapshot.bars.iter().find(|(_, bar)| !bar.is_valid()) {
                return Err(FeedError::InvalidBar {
                    line: self.line_no,
                    instrument: instrument.clone(),
                });
            }

            if let Some(last) = self.last_timestamp {
                if snapshot.timestamp <= last {
                    return Err(FeedError::OutOfOrder {
                        line: self.line_no,
                        timestamp: snapshot.timestamp.to_rfc3339(),
                    });
                }
            }
            self.last_timestamp = Some(snapshot.timestamp);

            let date = snapshot.timestamp.date_naive();
            if self.start_date.is_some_and(|start| date < start) {
                continue;
            }
            if self.end_date.is_some_and(|end| date > end) {
                return Ok(None);
            }

            return Ok(Some(snapshot));
        }

        Ok(None)
    }
}
