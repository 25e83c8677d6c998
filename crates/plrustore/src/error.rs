//! Error types for plrustore

use std::fmt;
use std::io;

/// Result type alias for snapshot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for snapshot reading and writing
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Malformed snapshot line (1-based line number)
    Parse {
        /// Line on which parsing failed
        line: usize,
        /// What was wrong with it
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
