//! Entry types shared by the cache, its ledger and its callers

use plrustore::SnapshotRecord;
use serde::Serialize;

/// Cache key
pub type Key = i32;

/// Cached value
pub type Value = i32;

/// Eviction priority; how it is read depends on the [`PriorityOrder`](crate::PriorityOrder)
pub type Priority = i32;

/// Priority given to entries inserted without one ("medium" on a 1..=3 scale)
pub const DEFAULT_PRIORITY: Priority = 2;

/// A resident (or evicted) cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Unique key among resident entries
    pub key: Key,
    /// Stored payload
    pub value: Value,
    /// Eviction priority
    pub priority: Priority,
}

impl Entry {
    /// Create a new entry
    pub fn new(key: Key, value: Value, priority: Priority) -> Self {
        Self {
            key,
            value,
            priority,
        }
    }
}

impl From<Entry> for SnapshotRecord {
    fn from(entry: Entry) -> Self {
        SnapshotRecord {
            key: entry.key,
            value: entry.value,
            priority: entry.priority,
        }
    }
}

impl From<SnapshotRecord> for Entry {
    fn from(record: SnapshotRecord) -> Self {
        Entry::new(record.key, record.value, record.priority)
    }
}

/// Where an entry sits in the recency order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Most recently used (also reported for a sole entry)
    Front,
    /// Least recently used
    Back,
    /// Anywhere in between
    Interior,
}

impl Position {
    /// Classify a 0-based rank from the front in a list whose last rank is `last`
    pub fn classify(rank: usize, last: usize) -> Self {
        if rank == 0 {
            Position::Front
        } else if rank == last {
            Position::Back
        } else {
            Position::Interior
        }
    }
}

/// Result of a non-mutating [`search`](crate::PriorityCache::search)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// The entry found
    pub entry: Entry,
    /// Distance from the front (0 = most recently used)
    pub rank: usize,
    /// Front / back / interior classification
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_classify() {
        assert_eq!(Position::classify(0, 0), Position::Front);
        assert_eq!(Position::classify(0, 3), Position::Front);
        assert_eq!(Position::classify(3, 3), Position::Back);
        assert_eq!(Position::classify(1, 3), Position::Interior);
    }

    #[test]
    fn test_record_conversion() {
        let entry = Entry::new(4, 40, 1);
        let record = SnapshotRecord::from(entry);
        assert_eq!(record.to_string(), "4 40 1");
        assert_eq!(Entry::from(record), entry);
    }
}
