//! Error types for plrucache

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by cache construction and snapshot I/O
///
/// Lookups never fail: a missing key is `None`, not an error.
#[derive(Debug)]
pub enum Error {
    /// Capacity must be at least 1
    ZeroCapacity,

    /// Eviction ledger must hold at least 1 entry
    ZeroLedgerCapacity,

    /// Snapshot read/write failed
    Store(plrustore::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Cache capacity must be greater than 0"),
            Error::ZeroLedgerCapacity => {
                write!(f, "Eviction ledger capacity must be greater than 0")
            }
            Error::Store(e) => write!(f, "Snapshot error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<plrustore::Error> for Error {
    fn from(err: plrustore::Error) -> Self {
        Error::Store(err)
    }
}

/// Internal consistency failure between the index and the recency list
///
/// Only reachable through a bug; the cache checks for it under
/// `debug_assertions` after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
