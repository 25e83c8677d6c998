//! # plrucache
//!
//! Bounded key/value cache with LRU ordering and priority-weighted eviction.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1))
//! - **Recency List**: slot arena threaded as a doubly-linked list (O(1))
//! - **Eviction Policy**: plain LRU (O(1)) or priority-then-recency (O(n))
//! - **Eviction Ledger**: last N victims, oldest first
//! - **Statistics**: hits, misses, evictions; reset by `clear`
//!
//! ## Example
//! ```
//! use plrucache::{EvictionPolicy, PriorityCache};
//!
//! let mut cache = PriorityCache::new(2, EvictionPolicy::Lru).unwrap();
//! cache.put(1, 10);
//! cache.put(2, 20);
//! cache.put(3, 30); // evicts 1
//!
//! assert_eq!(cache.get(1), None);
//! assert_eq!(cache.get(2), Some(20));
//! assert_eq!(cache.evicted()[0].key, 1);
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod entry;
mod error;
mod index;
mod ledger;
mod lru;
mod persist;
mod policy;
mod shared;
mod stats;

pub use cache::{PriorityCache, PutOutcome};
pub use config::CacheConfig;
pub use entry::{Entry, Key, Position, Priority, SearchHit, Value, DEFAULT_PRIORITY};
pub use error::{Error, InvariantError, Result};
pub use ledger::MAX_EVICTED;
pub use persist::{LoadReport, ReplayOrder};
pub use policy::{EvictionPolicy, PriorityOrder};
pub use shared::SharedCache;
pub use stats::StatsSnapshot;
