//! Errors.

use std::io;
use std::path::PathBuf;

/// Errors from searching.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file or directory could not be opened or read.
    #[error("{}: {source}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A path does not fit in a match record.
    #[error("{}: path is {len} bytes, longer than the maximum of {max}", path.display())]
    PathTooLong {
        /// Offending path.
        path: PathBuf,
        /// Length of the path in bytes.
        len: usize,
        /// Maximum length.
        max: usize,
    },
    /// A matched token does not fit in a match record.
    #[error("token is {len} bytes, longer than the maximum of {max}")]
    LexemeTooLong {
        /// Length of the token in bytes.
        len: usize,
        /// Maximum length.
        max: usize,
    },
    /// The query does not fit in a match record.
    #[error("query is {len} bytes, longer than the maximum of {max}")]
    QueryTooLong {
        /// Length of the query in bytes.
        len: usize,
        /// Maximum length.
        max: usize,
    },
    /// The result store was asked to start with no room.
    #[error("initial result capacity must be at least 1")]
    InvalidCapacity,
    /// The result store could not grow.
    #[error("out of memory growing result storage to {requested} entries")]
    Allocation {
        /// Capacity that was being allocated.
        requested: usize,
    },
    /// Directory traversal failed.
    #[error(transparent)]
    Walk(#[from] ignore::Error),
}

impl Error {
    /// Can the search continue after this error?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::PathTooLong { .. } | Error::Walk(_)
        )
    }
}

/// Result alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
