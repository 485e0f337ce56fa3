//! Draw history and relative age formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One committed draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// The option label at the time of the draw. Kept as a snapshot;
    /// removing the option later does not rewrite history.
    pub option: String,
    /// When the draw happened.
    pub timestamp: DateTime<Utc>,
    /// Running pick count at the time of the draw (1-based).
    pub sequence_number: u64,
}

/// Append-only log of committed draws, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    records: Vec<DrawRecord>,
}

impl HistoryLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record at the end.
    pub fn push(&mut self, record: DrawRecord) {
        self.records.push(record);
    }

    /// Records oldest first.
    #[must_use]
    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// Records newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &DrawRecord> {
        self.records.iter().rev()
    }

    /// Whether the given label appears anywhere in the log.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.records.iter().any(|r| r.option == label)
    }

    /// Removes all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Formats how long ago `timestamp` was, relative to `now`.
///
/// Under a minute reads "just now", under an hour in minutes, under a
/// day in hours, anything older as the calendar date.
#[must_use]
pub fn format_relative_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();
    if seconds < 60 {
        "just now".to_owned()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}
