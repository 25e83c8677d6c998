//! # plrustore
//!
//! Flat-file snapshots for the PLRU cache.
//!
//! ## Format
//! - One line per resident entry: `key value priority`
//! - Signed decimal integers, single-space separated, `\n`-terminated
//! - Lines ordered most-recently-used first
//!
//! Snapshots are best-effort: a missing file reads as "no snapshot", and
//! writes replace the previous file through a rename.

#![warn(missing_docs)]

mod error;
mod parser;
mod snapshot;

pub use error::{Error, Result};
pub use parser::{format_line, parse_line, parse_snapshot, parse_snapshot_prefix, SnapshotRecord};
pub use snapshot::{
    read_snapshot, read_snapshot_prefix, write_snapshot, PartialSnapshot, DEFAULT_SNAPSHOT_FILE,
};
