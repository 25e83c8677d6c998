//! Cache statistics tracking

use serde::Serialize;

/// Running counters, reset only by [`clear`](crate::PriorityCache::clear)
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
    inserts: u64,
    updates: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Record a cache miss
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Record an eviction
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Record an insert of a new key
    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    /// Record an in-place update of a resident key
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Freeze the counters together with the current ledger size
    pub fn snapshot(&self, ledger_len: usize) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            inserts: self.inserts,
            updates: self.updates,
            ledger_len,
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Point-in-time copy of the cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Successful `get` calls
    pub hits: u64,
    /// `get` calls for absent keys
    pub misses: u64,
    /// Entries evicted to make room
    pub evictions: u64,
    /// New keys inserted
    pub inserts: u64,
    /// Resident keys overwritten
    pub updates: u64,
    /// Entries currently held in the eviction ledger
    pub ledger_len: usize,
}

impl StatsSnapshot {
    /// Total `get` calls
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
