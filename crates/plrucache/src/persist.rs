//! Snapshot save/load through the public cache contract

use std::path::Path;

use plrustore::{read_snapshot_prefix, write_snapshot, SnapshotRecord};
use tracing::debug;

use crate::cache::PriorityCache;
use crate::error::Result;

/// How snapshot lines are replayed into the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayOrder {
    /// Replay lines top to bottom; the saved MRU entry ends up LRU
    #[default]
    FileOrder,
    /// Replay lines bottom to top, restoring the saved recency order
    PreserveRecency,
}

/// Outcome of replaying a snapshot
#[derive(Debug)]
pub struct LoadReport {
    /// Number of records replayed
    pub replayed: usize,
    /// Malformed line that ended the replay early
    pub stopped_at: Option<plrustore::Error>,
}

impl LoadReport {
    /// Whether every line of the snapshot was replayed
    pub fn is_complete(&self) -> bool {
        self.stopped_at.is_none()
    }
}

impl PriorityCache {
    /// Write resident entries to `path`, most recently used first
    ///
    /// # Returns
    /// * `Result<usize>` - Number of entries written
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let records = self.entries().map(|entry| SnapshotRecord::from(*entry));
        Ok(write_snapshot(path, records)?)
    }

    /// Replay a snapshot through `put_with_priority`
    ///
    /// Lines before the first malformed one are replayed; the malformed line
    /// and everything after it are skipped and reported in
    /// [`LoadReport::stopped_at`]. Replaying more lines than the capacity
    /// evicts as usual.
    ///
    /// # Returns
    /// * `Ok(None)` if there is no snapshot at `path`
    /// * `Ok(Some(report))` otherwise
    pub fn load_snapshot<P: AsRef<Path>>(
        &mut self,
        path: P,
        order: ReplayOrder,
    ) -> Result<Option<LoadReport>> {
        let snapshot = match read_snapshot_prefix(path)? {
            Some(snapshot) => snapshot,
            None => return Ok(None),
        };

        let replayed = snapshot.records.len();
        let replay: Box<dyn Iterator<Item = SnapshotRecord>> = match order {
            ReplayOrder::FileOrder => Box::new(snapshot.records.into_iter()),
            ReplayOrder::PreserveRecency => Box::new(snapshot.records.into_iter().rev()),
        };
        for record in replay {
            self.put_with_priority(record.key, record.value, record.priority);
        }

        debug!("Replayed {} snapshot entries ({:?})", replayed, order);
        Ok(Some(LoadReport {
            replayed,
            stopped_at: snapshot.error,
        }))
    }
}
