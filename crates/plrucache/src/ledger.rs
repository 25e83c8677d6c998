//! Bounded history of evicted entries

use std::collections::VecDeque;

use crate::entry::Entry;

/// Default number of evictions remembered
pub const MAX_EVICTED: usize = 10;

/// FIFO ring of the most recent evictions, oldest first
#[derive(Debug, Clone)]
pub struct EvictionLedger {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl EvictionLedger {
    /// Create a ledger holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an eviction, dropping the oldest record when full
    pub fn record(&mut self, entry: Entry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Copy of the records, oldest first
    pub fn to_vec(&self) -> Vec<Entry> {
        self.entries.iter().copied().collect()
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Maximum number of records
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget every record
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for EvictionLedger {
    fn default() -> Self {
        Self::new(MAX_EVICTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: i32) -> Entry {
        Entry::new(key, key * 10, 1)
    }

    #[test]
    fn test_ledger_append_under_capacity() {
        let mut ledger = EvictionLedger::new(3);
        ledger.record(entry(1));
        ledger.record(entry(2));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.to_vec(), vec![entry(1), entry(2)]);
    }

    #[test]
    fn test_ledger_drops_oldest() {
        let mut ledger = EvictionLedger::new(3);
        for key in 1..=5 {
            ledger.record(entry(key));
        }

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.to_vec(), vec![entry(3), entry(4), entry(5)]);
    }

    #[test]
    fn test_ledger_default_bound() {
        let mut ledger = EvictionLedger::default();
        for key in 0..25 {
            ledger.record(entry(key));
        }

        assert_eq!(ledger.capacity(), MAX_EVICTED);
        assert_eq!(ledger.len(), MAX_EVICTED);
        let keys: Vec<_> = ledger.to_vec().iter().map(|e| e.key).collect();
        assert_eq!(keys, (15..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_ledger_clear() {
        let mut ledger = EvictionLedger::new(2);
        ledger.record(entry(1));
        ledger.clear();

        assert_eq!(ledger.len(), 0);
        assert!(ledger.to_vec().is_empty());
    }
}
