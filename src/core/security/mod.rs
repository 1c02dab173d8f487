// Security module for path resolution and boundary enforcement
//
// This module provides the guard that restricts file system operations to
// the configured workspace directory, preventing path traversal and
// symlink indirection from escaping it.

pub mod path_guard;

pub use path_guard::{PathGuard, PathGuardError};
