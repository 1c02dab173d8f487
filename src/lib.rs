//! Sandboxed File Manager Library
//!
//! This crate provides an interactive command-line file manager whose
//! filesystem operations are confined to a configured workspace directory.
//! Any operation whose canonical target would fall outside that workspace is
//! rejected before any I/O takes place.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   and the path guard that enforces the workspace boundary
//! - **domains**: Business logic organized by bounded contexts
//!   - **fs**: The sandboxed filesystem operations (create, read, write,
//!     copy, move, rename, delete, navigate, list)
//! - **cli**: The interactive shell, including command parsing and the
//!   read/dispatch loop
//!
//! # Example
//!
//! ```rust,no_run
//! use filebox::domains::fs::FileManager;
//!
//! fn main() -> anyhow::Result<()> {
//!     std::fs::create_dir_all("workspace")?;
//!     let mut manager = FileManager::new(std::path::Path::new("workspace"))?;
//!     manager.write_file("notes.txt", "hello")?;
//!     let content = manager.read_file("notes.txt")?;
//!     assert_eq!(content, "hello");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, Result};
pub use crate::domains::fs::{FileManager, FsError};
