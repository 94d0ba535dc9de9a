//! Storage error types for livecode-storage.
//!
//! [`StorageError`] covers the three failure kinds of the code store:
//! a malformed identifier, a missing program, and a backend I/O failure.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by identifier validation and storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Raw text does not match the program identifier pattern.
    #[error("invalid program id: {raw:?}, must match {pattern:?}")]
    InvalidIdentifier { raw: String, pattern: &'static str },

    /// No program is stored under the given identifier.
    #[error("program not found: {0}")]
    NotFound(String),

    /// The backend failed to read or write program text.
    #[error("storage failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Wraps an I/O error with the path that produced it.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for [`StorageError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
