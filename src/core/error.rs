//! Error types and handling for the file manager.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application.

use thiserror::Error;

/// A specialized Result type for file manager operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the file manager.
///
/// This enum captures the error conditions that can occur outside a single
/// filesystem operation: configuration loading, startup I/O, and domain
/// errors bubbling up to the binary entry point.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the sandboxed filesystem domain.
    #[error("File system error: {0}")]
    Fs(#[from] crate::domains::fs::FsError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from startup or the interactive loop.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
