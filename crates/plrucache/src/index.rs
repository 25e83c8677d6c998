//! Key index: maps each resident key to its recency-list slot

use std::collections::HashMap;

use ahash::RandomState;

use crate::entry::Key;
use crate::lru::SlotId;

/// Hash index over resident keys
///
/// Grows as needed, so distinct keys never shadow each other.
pub struct Index {
    map: HashMap<Key, SlotId, RandomState>,
}

impl Index {
    /// Create an index sized for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Slot holding `key`, if resident
    pub fn lookup(&self, key: Key) -> Option<SlotId> {
        self.map.get(&key).copied()
    }

    /// Map `key` to `slot`, returning the slot it previously pointed at
    pub fn insert(&mut self, key: Key, slot: SlotId) -> Option<SlotId> {
        self.map.insert(key, slot)
    }

    /// Forget `key`
    pub fn remove(&mut self, key: Key) -> Option<SlotId> {
        self.map.remove(&key)
    }

    /// Check whether `key` is indexed
    pub fn contains(&self, key: Key) -> bool {
        self.map.contains_key(&key)
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Remove every key
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
