//! PriorityCache: bounded LRU cache with priority-weighted eviction

use serde::Serialize;
use tracing::debug;

use crate::config::CacheConfig;
use crate::entry::{Entry, Key, Position, Priority, SearchHit, Value, DEFAULT_PRIORITY};
use crate::error::{InvariantError, Result};
use crate::index::Index;
use crate::ledger::EvictionLedger;
use crate::lru::RecencyList;
use crate::policy::EvictionPolicy;
use crate::stats::{CacheStats, StatsSnapshot};

/// What a `put` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PutOutcome {
    /// New key stored, possibly after evicting a victim
    Inserted {
        /// Entry removed to make room, if the cache was full
        evicted: Option<Entry>,
    },
    /// Resident key overwritten in place and moved to the front
    Updated {
        /// The entry as it was before the update
        previous: Entry,
    },
}

/// Bounded key/value cache combining an index, a recency list, an eviction
/// policy, an eviction ledger and hit/miss statistics
pub struct PriorityCache {
    /// Key -> slot lookup
    index: Index,

    /// Owns the entries and their MRU -> LRU order
    recency: RecencyList,

    /// Recently evicted entries
    ledger: EvictionLedger,

    /// Cache statistics
    stats: CacheStats,

    /// Victim selection
    policy: EvictionPolicy,

    /// Cache capacity
    capacity: usize,
}

impl PriorityCache {
    /// Create a new cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident entries (at least 1)
    /// * `policy` - Victim selection strategy
    ///
    /// # Returns
    /// * `Result<PriorityCache>` - Empty cache, or `ZeroCapacity`
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity).with_policy(policy))
    }

    /// Create a new cache from a full configuration
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            index: Index::with_capacity(config.capacity),
            recency: RecencyList::with_capacity(config.capacity),
            ledger: EvictionLedger::new(config.ledger_capacity),
            stats: CacheStats::new(),
            policy: config.policy,
            capacity: config.capacity,
        })
    }

    /// Insert or update `key` with [`DEFAULT_PRIORITY`] for new entries
    ///
    /// An existing entry keeps its priority.
    pub fn put(&mut self, key: Key, value: Value) -> PutOutcome {
        self.upsert(key, value, None)
    }

    /// Insert or update `key`, setting its priority either way
    pub fn put_with_priority(&mut self, key: Key, value: Value, priority: Priority) -> PutOutcome {
        self.upsert(key, value, Some(priority))
    }

    /// Get a value, marking it most recently used
    ///
    /// # Returns
    /// * `Some(value)` on a hit, `None` on a miss; both are counted
    pub fn get(&mut self, key: Key) -> Option<Value> {
        let value = match self.index.lookup(key) {
            Some(slot) => {
                self.recency.move_to_front(slot);
                self.recency.get(slot).map(|entry| entry.value)
            }
            None => None,
        };

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        debug_assert_eq!(self.check_invariants(), Ok(()));
        value
    }

    /// Find `key` without touching recency order or statistics
    ///
    /// Walks from the most recently used end so the rank is known.
    pub fn search(&self, key: Key) -> Option<SearchHit> {
        let last = self.recency.len().checked_sub(1)?;
        self.recency
            .iter()
            .enumerate()
            .find(|(_, (_, entry))| entry.key == key)
            .map(|(rank, (_, entry))| SearchHit {
                entry: *entry,
                rank,
                position: Position::classify(rank, last),
            })
    }

    /// Check residency without touching recency order or statistics
    pub fn contains(&self, key: Key) -> bool {
        self.index.contains(key)
    }

    /// Remove every entry and reset the ledger and statistics
    pub fn clear(&mut self) {
        self.index.clear();
        self.recency.clear();
        self.ledger.clear();
        self.stats.reset();
        debug!("Cache cleared");
    }

    /// Current statistics
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.ledger.len())
    }

    /// Evicted entries, oldest first
    pub fn evicted(&self) -> Vec<Entry> {
        self.ledger.to_vec()
    }

    /// Resident entries, most recently used first
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Entry> + ExactSizeIterator + '_ {
        self.recency.iter().map(|(_, entry)| entry)
    }

    /// Most recently used entry
    pub fn front(&self) -> Option<&Entry> {
        self.recency.front().and_then(|slot| self.recency.get(slot))
    }

    /// Least recently used entry
    pub fn back(&self) -> Option<&Entry> {
        self.recency.back().and_then(|slot| self.recency.get(slot))
    }

    /// Entry the policy would evict next if the cache were full
    pub fn next_victim(&self) -> Option<&Entry> {
        self.policy
            .select_victim(&self.recency)
            .and_then(|slot| self.recency.get(slot))
    }

    /// Get current number of resident entries
    pub fn len(&self) -> usize {
        self.recency.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.recency.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the eviction policy
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Get the maximum number of ledger records
    pub fn ledger_capacity(&self) -> usize {
        self.ledger.capacity()
    }

    /// Verify that the index and recency list agree and bounds hold
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        self.recency.check_invariants()?;

        if self.index.len() != self.recency.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, recency list {} entries",
                self.index.len(),
                self.recency.len()
            )));
        }
        if self.recency.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} resident entries exceed capacity {}",
                self.recency.len(),
                self.capacity
            )));
        }
        for (slot, entry) in self.recency.iter() {
            if self.index.lookup(entry.key) != Some(slot) {
                return Err(InvariantError::new(format!(
                    "key {} in slot {} is not indexed there",
                    entry.key, slot
                )));
            }
        }
        if self.ledger.len() > self.ledger.capacity() {
            return Err(InvariantError::new("eviction ledger over capacity"));
        }
        Ok(())
    }

    fn upsert(&mut self, key: Key, value: Value, priority: Option<Priority>) -> PutOutcome {
        if let Some(slot) = self.index.lookup(key) {
            if let Some(entry) = self.recency.get_mut(slot) {
                let previous = *entry;
                entry.value = value;
                if let Some(priority) = priority {
                    entry.priority = priority;
                }
                self.recency.move_to_front(slot);
                self.stats.record_update();
                debug_assert_eq!(self.check_invariants(), Ok(()));
                return PutOutcome::Updated { previous };
            }
            // Stale index entry; drop it and insert afresh
            self.index.remove(key);
        }

        let evicted = if self.recency.len() >= self.capacity {
            self.evict_one()
        } else {
            None
        };

        let entry = Entry::new(key, value, priority.unwrap_or(DEFAULT_PRIORITY));
        let slot = self.recency.push_front(entry);
        self.index.insert(key, slot);
        self.stats.record_insert();

        debug_assert_eq!(self.check_invariants(), Ok(()));
        PutOutcome::Inserted { evicted }
    }

    fn evict_one(&mut self) -> Option<Entry> {
        let victim = match self.policy {
            EvictionPolicy::Lru => self.recency.pop_back()?,
            EvictionPolicy::PriorityLru(_) => {
                let slot = self.policy.select_victim(&self.recency)?;
                self.recency.remove(slot)?
            }
        };

        self.index.remove(victim.key);
        self.ledger.record(victim);
        self.stats.record_eviction();
        debug!(
            "Cache full, evicted [{}:{}] (priority {}) under {}",
            victim.key, victim.value, victim.priority, self.policy
        );
        Some(victim)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::policy::PriorityOrder;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Put(i32, i32, i32),
        Get(i32),
        Search(i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..24i32, any::<i32>(), 1..=3i32).prop_map(|(k, v, p)| Op::Put(k, v, p)),
            3 => (0..24i32).prop_map(Op::Get),
            1 => (0..24i32).prop_map(Op::Search),
        ]
    }

    fn policy() -> impl Strategy<Value = EvictionPolicy> {
        prop_oneof![
            Just(EvictionPolicy::Lru),
            Just(EvictionPolicy::PriorityLru(PriorityOrder::HigherIsDisposable)),
            Just(EvictionPolicy::PriorityLru(PriorityOrder::LowerIsDisposable)),
        ]
    }

    proptest! {
        /// Property: resident count never exceeds capacity, structures agree
        #[test]
        fn prop_capacity_and_consistency(
            capacity in 1usize..8,
            policy in policy(),
            ops in prop::collection::vec(op(), 0..120)
        ) {
            let mut cache = PriorityCache::new(capacity, policy).unwrap();
            for op in ops {
                match op {
                    Op::Put(k, v, p) => { cache.put_with_priority(k, v, p); }
                    Op::Get(k) => { cache.get(k); }
                    Op::Search(k) => { cache.search(k); }
                }
                prop_assert!(cache.len() <= capacity);
                prop_assert_eq!(cache.check_invariants(), Ok(()));
            }
        }

        /// Property: touched key becomes front, old front becomes second
        #[test]
        fn prop_touch_moves_to_front(
            capacity in 2usize..8,
            keys in prop::collection::vec(0..16i32, 2..20),
            pick in any::<prop::sample::Index>()
        ) {
            let mut cache = PriorityCache::new(capacity, EvictionPolicy::Lru).unwrap();
            for &k in &keys {
                cache.put(k, k);
            }
            let resident: Vec<i32> = cache.entries().map(|e| e.key).collect();
            let key = resident[pick.index(resident.len())];
            let old_front = resident[0];

            prop_assert_eq!(cache.get(key), Some(key));
            let order: Vec<i32> = cache.entries().map(|e| e.key).collect();
            prop_assert_eq!(order[0], key);
            if key != old_front {
                prop_assert_eq!(order[1], old_front);
            }
        }

        /// Property: hits + misses equals the number of gets
        #[test]
        fn prop_lookup_accounting(
            ops in prop::collection::vec(op(), 0..80)
        ) {
            let mut cache = PriorityCache::new(4, EvictionPolicy::hybrid()).unwrap();
            let mut gets = 0u64;
            for op in ops {
                match op {
                    Op::Put(k, v, p) => { cache.put_with_priority(k, v, p); }
                    Op::Get(k) => { gets += 1; cache.get(k); }
                    Op::Search(k) => { cache.search(k); }
                }
            }
            prop_assert_eq!(cache.stats().lookups(), gets);
            cache.clear();
            prop_assert_eq!(cache.stats(), StatsSnapshot::default());
        }

        /// Property: distinct inserts into plain LRU evict in insertion order
        #[test]
        fn prop_lru_evicts_first_inserted(capacity in 1usize..10, extra in 1usize..10) {
            let mut cache = PriorityCache::new(capacity, EvictionPolicy::Lru).unwrap();
            let total = (capacity + extra) as i32;
            for k in 0..total {
                cache.put(k, k);
            }
            let evicted: Vec<i32> = cache.evicted().iter().map(|e| e.key).collect();
            let expected_start = (extra.saturating_sub(cache.ledger_capacity())) as i32;
            prop_assert_eq!(evicted, (expected_start..extra as i32).collect::<Vec<_>>());
        }
    }
}
