//! Sandboxed filesystem domain.
//!
//! This module implements every user-facing filesystem operation. Each
//! operation resolves its target through the path guard first and performs
//! I/O only when the canonical target stays inside the workspace.
//!
//! ## Architecture
//!
//! - `service.rs` - the [`FileManager`], one method per operation
//! - `entry.rs` - directory listing entry model
//! - `error.rs` - filesystem-specific error types

mod entry;
mod error;
mod service;

pub use entry::{DirEntry, EntryKind};
pub use error::FsError;
pub use service::FileManager;
