//! Thread-shareable handle around a single cache

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{PriorityCache, PutOutcome};
use crate::entry::{Entry, Key, Priority, SearchHit, Value};
use crate::stats::StatsSnapshot;

/// A [`PriorityCache`] behind one mutex
///
/// Every call holds the lock for the whole operation, so index and recency
/// updates are observed together. Clones share the same cache.
#[derive(Clone)]
pub struct SharedCache {
    inner: Arc<Mutex<PriorityCache>>,
}

impl SharedCache {
    /// Wrap a cache for shared use
    pub fn new(cache: PriorityCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// See [`PriorityCache::put`]
    pub fn put(&self, key: Key, value: Value) -> PutOutcome {
        self.inner.lock().put(key, value)
    }

    /// See [`PriorityCache::put_with_priority`]
    pub fn put_with_priority(&self, key: Key, value: Value, priority: Priority) -> PutOutcome {
        self.inner.lock().put_with_priority(key, value, priority)
    }

    /// See [`PriorityCache::get`]
    pub fn get(&self, key: Key) -> Option<Value> {
        self.inner.lock().get(key)
    }

    /// See [`PriorityCache::search`]
    pub fn search(&self, key: Key) -> Option<SearchHit> {
        self.inner.lock().search(key)
    }

    /// See [`PriorityCache::clear`]
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// See [`PriorityCache::stats`]
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats()
    }

    /// See [`PriorityCache::evicted`]
    pub fn evicted(&self) -> Vec<Entry> {
        self.inner.lock().evicted()
    }

    /// Get current number of resident entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with exclusive access, for multi-step operations
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut PriorityCache) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<PriorityCache> for SharedCache {
    fn from(cache: PriorityCache) -> Self {
        Self::new(cache)
    }
}
