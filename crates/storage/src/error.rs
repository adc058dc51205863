//! Error types for the storage layer.
//!
//! These errors describe what went wrong while touching the filesystem. They
//! are deliberately detailed because they feed the diagnostics channel; the
//! sandbox resolver never lets them reach a caller.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all file store operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The path (or one of its parents) does not exist.
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The OS refused access to the path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// The path could not be represented or was rejected by the OS.
    #[error("invalid path: {reason}")]
    InvalidPath { reason: String },

    /// The path exists but is not a regular file.
    #[error("not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },

    /// Any other I/O failure.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Classifies an [`io::Error`] raised while operating on `path`.
    pub fn from_io(err: io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound { path },
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied { path },
            io::ErrorKind::InvalidInput => StorageError::InvalidPath {
                reason: format!("{}: {}", path.display(), err),
            },
            _ => StorageError::Io { path, source: err },
        }
    }

    /// Returns `true` for errors that simply mean "nothing is there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classification() {
        let err = StorageError::from_io(io::Error::from(io::ErrorKind::NotFound), "/a");
        assert!(err.is_not_found());

        let err = StorageError::from_io(io::Error::from(io::ErrorKind::PermissionDenied), "/a");
        assert!(matches!(err, StorageError::PermissionDenied { .. }));

        let err = StorageError::from_io(io::Error::from(io::ErrorKind::InvalidInput), "/a");
        assert!(matches!(err, StorageError::InvalidPath { .. }));

        let err = StorageError::from_io(io::Error::other("disk on fire"), "/a");
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display() {
        let err = StorageError::NotAFile {
            path: PathBuf::from("/srv/acme/public/files/img"),
        };
        assert_eq!(err.to_string(), "not a regular file: /srv/acme/public/files/img");
    }
}
