//! Cache construction parameters

use crate::error::{Error, Result};
use crate::ledger::MAX_EVICTED;
use crate::policy::EvictionPolicy;

/// Parameters fixed for the lifetime of a [`PriorityCache`](crate::PriorityCache)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of resident entries
    pub capacity: usize,
    /// Victim selection strategy
    pub policy: EvictionPolicy,
    /// Number of evictions remembered in the ledger
    pub ledger_capacity: usize,
}

impl CacheConfig {
    /// Hybrid priority-LRU config with the default ledger size
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: EvictionPolicy::default(),
            ledger_capacity: MAX_EVICTED,
        }
    }

    /// Use a different eviction policy
    pub fn with_policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Remember a different number of evictions
    pub fn with_ledger_capacity(mut self, ledger_capacity: usize) -> Self {
        self.ledger_capacity = ledger_capacity;
        self
    }

    /// Reject zero-sized caches and ledgers
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if self.ledger_capacity == 0 {
            return Err(Error::ZeroLedgerCapacity);
        }
        Ok(())
    }
}
