//! Filesystem-specific error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::security::PathGuardError;

/// Errors that can occur during sandboxed filesystem operations.
///
/// Every operation is total: it returns one of these instead of panicking
/// or letting an I/O error escape unlabeled.
#[derive(Debug, Error)]
pub enum FsError {
    /// The canonical target lies outside the workspace root. Detected
    /// before any I/O is attempted.
    #[error("Cannot leave the workspace: '{}' is outside the root", path.display())]
    BoundaryViolation { path: PathBuf },

    /// A required source or target does not exist.
    #[error("'{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    /// The navigation target exists but is not a directory.
    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// The requested path could not be canonicalized.
    #[error("Cannot resolve path '{}': {source}", path.display())]
    Resolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The underlying platform call failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<PathGuardError> for FsError {
    fn from(err: PathGuardError) -> Self {
        match err {
            PathGuardError::Resolution { path, source } => Self::Resolution { path, source },
        }
    }
}

impl FsError {
    /// Attach a path to a raw I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new "not found" error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }
}
