//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the file
//! manager, including error handling, configuration, and the security
//! layer that keeps every operation inside the workspace.

pub mod config;
pub mod error;
pub mod security;

pub use config::Config;
pub use error::{Error, Result};
pub use security::{PathGuard, PathGuardError};
