//! Eviction policies
//!
//! - [`EvictionPolicy::Lru`]: evict the back of the recency list, O(1).
//! - [`EvictionPolicy::PriorityLru`]: evict the most disposable priority,
//!   breaking ties toward the least recently used entry, O(n).

use std::fmt;

use serde::Serialize;

use crate::entry::Priority;
use crate::lru::{RecencyList, SlotId};

/// Which end of the priority scale is evicted first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Numerically highest priority goes first (1 = keep, 3 = disposable)
    #[default]
    HigherIsDisposable,
    /// Numerically lowest priority goes first
    LowerIsDisposable,
}

impl PriorityOrder {
    /// Whether `candidate` is strictly more disposable than `current`
    pub fn is_more_disposable(self, candidate: Priority, current: Priority) -> bool {
        match self {
            PriorityOrder::HigherIsDisposable => candidate > current,
            PriorityOrder::LowerIsDisposable => candidate < current,
        }
    }
}

/// Victim selection strategy, fixed per cache instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Plain least-recently-used
    Lru,
    /// Priority first, recency as tie-break
    PriorityLru(PriorityOrder),
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        EvictionPolicy::PriorityLru(PriorityOrder::default())
    }
}

impl EvictionPolicy {
    /// Hybrid policy with the default priority order
    pub fn hybrid() -> Self {
        Self::default()
    }

    /// Nominate the slot to evict, or `None` if the list is empty
    pub fn select_victim(&self, list: &RecencyList) -> Option<SlotId> {
        match self {
            EvictionPolicy::Lru => list.back(),
            EvictionPolicy::PriorityLru(order) => {
                // Walk LRU -> MRU and only replace on a strictly better
                // candidate, so the stalest entry wins among ties.
                let mut victim: Option<(SlotId, Priority)> = None;
                for (slot, entry) in list.iter().rev() {
                    match victim {
                        Some((_, best)) if !order.is_more_disposable(entry.priority, best) => {}
                        _ => victim = Some((slot, entry.priority)),
                    }
                }
                victim.map(|(slot, _)| slot)
            }
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionPolicy::Lru => write!(f, "lru"),
            EvictionPolicy::PriorityLru(PriorityOrder::HigherIsDisposable) => {
                write!(f, "priority-lru (higher evicts first)")
            }
            EvictionPolicy::PriorityLru(PriorityOrder::LowerIsDisposable) => {
                write!(f, "priority-lru (lower evicts first)")
            }
        }
    }
}
