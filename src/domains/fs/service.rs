//! The sandboxed filesystem service.
//!
//! [`FileManager`] owns the workspace root and the current directory cursor
//! and implements one method per user-facing operation. Every mutating
//! operation follows the same guard-then-act protocol: resolve the
//! requested path through the [`PathGuard`], reject it if the canonical
//! target leaves the workspace, and only then touch the filesystem.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::core::security::PathGuard;

use super::entry::{DirEntry, EntryKind};
use super::error::FsError;

/// Sandboxed filesystem operations rooted at a workspace directory.
///
/// The root is immutable for the lifetime of the instance. The current
/// directory cursor starts at the root and is only moved by
/// [`FileManager::change_dir`], and only to canonical in-bounds targets.
/// Instances are independent: several managers with different roots can
/// coexist in one process.
#[derive(Debug)]
pub struct FileManager {
    guard: PathGuard,
    current: PathBuf,
}

impl FileManager {
    /// Create a manager rooted at `root`, which must already exist.
    pub fn new(root: &Path) -> io::Result<Self> {
        let guard = PathGuard::new(root)?;
        let current = guard.root().to_path_buf();
        Ok(Self { guard, current })
    }

    /// The canonical workspace root.
    pub fn root(&self) -> &Path {
        self.guard.root()
    }

    /// The current directory cursor (always canonical and in bounds).
    pub fn current_dir(&self) -> &Path {
        &self.current
    }

    /// Resolve a requested path and reject it if it leaves the workspace.
    fn guarded(&self, requested: &str) -> Result<PathBuf, FsError> {
        let resolved = self.guard.resolve(&self.current, requested)?;
        if !self.guard.is_within_root(&resolved) {
            warn!("Rejected out-of-bounds target: {}", resolved.display());
            return Err(FsError::BoundaryViolation { path: resolved });
        }
        Ok(resolved)
    }

    /// Create a directory. Creating one that already exists is not an
    /// error.
    #[instrument(skip(self))]
    pub fn create_dir(&self, name: &str) -> Result<String, FsError> {
        let target = self.guarded(name)?;
        fs::create_dir_all(&target).map_err(|e| FsError::io(&target, e))?;
        info!("Created directory {}", target.display());
        Ok(format!("Created directory '{name}'"))
    }

    /// Delete a directory and everything beneath it.
    #[instrument(skip(self))]
    pub fn delete_dir(&self, name: &str) -> Result<String, FsError> {
        let target = self.guarded(name)?;
        if !target.exists() {
            return Err(FsError::not_found(target));
        }
        fs::remove_dir_all(&target).map_err(|e| FsError::io(&target, e))?;
        info!("Deleted directory {}", target.display());
        Ok(format!("Deleted directory '{name}'"))
    }

    /// Move the current directory cursor. Returns the new cursor on
    /// success; on any failure the cursor is left untouched.
    #[instrument(skip(self))]
    pub fn change_dir(&mut self, path: &str) -> Result<&Path, FsError> {
        let target = self.guarded(path)?;
        if !target.exists() {
            return Err(FsError::not_found(target));
        }
        if !target.is_dir() {
            return Err(FsError::NotADirectory { path: target });
        }
        self.current = target;
        info!("Changed directory to {}", self.current.display());
        Ok(&self.current)
    }

    /// Enumerate the immediate children of the current directory, sorted
    /// lexicographically by name.
    pub fn list_dir(&self) -> Result<Vec<DirEntry>, FsError> {
        let read = fs::read_dir(&self.current).map_err(|e| FsError::io(&self.current, e))?;

        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| FsError::io(&self.current, e))?;
            let kind = match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => EntryKind::Directory,
                Ok(_) => EntryKind::File,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            entries.push(DirEntry {
                kind,
                name: entry.file_name().to_string_lossy().into_owned(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Create an empty file. An existing file is left untouched.
    #[instrument(skip(self))]
    pub fn create_file(&self, name: &str) -> Result<String, FsError> {
        let target = self.guarded(name)?;
        OpenOptions::new()
            .write(true)
            .create(true)
            .open(&target)
            .map_err(|e| FsError::io(&target, e))?;
        info!("Created file {}", target.display());
        Ok(format!("Created file '{name}'"))
    }

    /// Read a whole file as UTF-8 text.
    ///
    /// Reads resolve through the guard for consistency but are not bounds
    /// rejected: a read cannot alter state outside the workspace.
    #[instrument(skip(self))]
    pub fn read_file(&self, name: &str) -> Result<String, FsError> {
        let target = self.guard.resolve(&self.current, name)?;
        if !target.exists() {
            return Err(FsError::not_found(target));
        }
        fs::read_to_string(&target).map_err(|e| FsError::io(&target, e))
    }

    /// Write a whole file, creating it or replacing its contents.
    #[instrument(skip(self, content))]
    pub fn write_file(&self, name: &str, content: &str) -> Result<String, FsError> {
        let target = self.guarded(name)?;
        fs::write(&target, content).map_err(|e| FsError::io(&target, e))?;
        info!("Wrote {} bytes to {}", content.len(), target.display());
        Ok(format!("Wrote file '{name}'"))
    }

    /// Delete a file.
    #[instrument(skip(self))]
    pub fn delete_file(&self, name: &str) -> Result<String, FsError> {
        let target = self.guarded(name)?;
        if !target.exists() {
            return Err(FsError::not_found(target));
        }
        fs::remove_file(&target).map_err(|e| FsError::io(&target, e))?;
        info!("Deleted file {}", target.display());
        Ok(format!("Deleted file '{name}'"))
    }

    /// Copy a file. The source must exist; only the destination is
    /// bounds-checked, since the copy can only create state there.
    #[instrument(skip(self))]
    pub fn copy_file(&self, source: &str, destination: &str) -> Result<String, FsError> {
        let src = self.guard.resolve(&self.current, source)?;
        if !src.exists() {
            return Err(FsError::not_found(src));
        }
        let dst = self.guarded(destination)?;
        fs::copy(&src, &dst).map_err(|e| FsError::io(&dst, e))?;
        info!("Copied {} to {}", src.display(), dst.display());
        Ok(format!("Copied '{source}' to '{destination}'"))
    }

    /// Move a file. The source must exist; only the destination is
    /// bounds-checked.
    #[instrument(skip(self))]
    pub fn move_file(&self, source: &str, destination: &str) -> Result<String, FsError> {
        let src = self.guard.resolve(&self.current, source)?;
        if !src.exists() {
            return Err(FsError::not_found(src));
        }
        let dst = self.guarded(destination)?;
        fs::rename(&src, &dst).map_err(|e| FsError::io(&dst, e))?;
        info!("Moved {} to {}", src.display(), dst.display());
        Ok(format!("Moved '{source}' to '{destination}'"))
    }

    /// Rename a file in place. The old name must exist; the new name is
    /// bounds-checked.
    #[instrument(skip(self))]
    pub fn rename_file(&self, old_name: &str, new_name: &str) -> Result<String, FsError> {
        let src = self.guard.resolve(&self.current, old_name)?;
        if !src.exists() {
            return Err(FsError::not_found(src));
        }
        let dst = self.guarded(new_name)?;
        fs::rename(&src, &dst).map_err(|e| FsError::io(&dst, e))?;
        info!("Renamed {} to {}", src.display(), dst.display());
        Ok(format!("Renamed '{old_name}' to '{new_name}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_for(dir: &TempDir) -> FileManager {
        FileManager::new(dir.path()).unwrap()
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        manager.create_dir("sub").unwrap();
        assert!(manager.root().join("sub").is_dir());

        // Second creation must not fail
        manager.create_dir("sub").unwrap();
    }

    #[test]
    fn test_delete_missing_dir_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        let result = manager.delete_dir("missing");
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn test_delete_dir_is_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        manager.create_dir("sub/inner").unwrap();
        manager.write_file("sub/inner/a.txt", "x").unwrap();

        manager.delete_dir("sub").unwrap();
        assert!(!manager.root().join("sub").exists());
    }

    #[test]
    fn test_navigate_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_for(&temp_dir);

        manager.create_dir("sub").unwrap();

        let new_dir = manager.change_dir("sub").unwrap().to_path_buf();
        assert_eq!(new_dir, manager.root().join("sub"));

        let back = manager.change_dir("..").unwrap().to_path_buf();
        assert_eq!(back, manager.root());

        // Leaving the root is rejected and the cursor stays put
        let result = manager.change_dir("..");
        assert!(matches!(result, Err(FsError::BoundaryViolation { .. })));
        assert_eq!(manager.current_dir(), manager.root());
    }

    #[test]
    fn test_navigate_to_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_for(&temp_dir);

        manager.write_file("a.txt", "x").unwrap();
        let result = manager.change_dir("a.txt");
        assert!(matches!(result, Err(FsError::NotADirectory { .. })));
    }

    #[test]
    fn test_navigate_to_missing_dir_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_for(&temp_dir);

        let result = manager.change_dir("missing");
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        for content in ["hello world", "", "line one\nline two\n"] {
            manager.write_file("a.txt", content).unwrap();
            assert_eq!(manager.read_file("a.txt").unwrap(), content);
        }
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        let result = manager.read_file("missing.txt");
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn test_create_file_leaves_existing_contents() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        manager.write_file("a.txt", "keep me").unwrap();
        manager.create_file("a.txt").unwrap();
        assert_eq!(manager.read_file("a.txt").unwrap(), "keep me");
    }

    #[test]
    fn test_copy_then_delete_source() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        manager.write_file("a.txt", "payload").unwrap();
        manager.copy_file("a.txt", "b.txt").unwrap();
        manager.delete_file("a.txt").unwrap();

        assert!(!manager.root().join("a.txt").exists());
        assert_eq!(manager.read_file("b.txt").unwrap(), "payload");
    }

    #[test]
    fn test_move_leaves_nothing_at_old_location() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        manager.write_file("a.txt", "payload").unwrap();
        manager.create_dir("sub").unwrap();
        manager.move_file("a.txt", "sub/a.txt").unwrap();

        let result = manager.read_file("a.txt");
        assert!(matches!(result, Err(FsError::NotFound { .. })));
        assert_eq!(manager.read_file("sub/a.txt").unwrap(), "payload");
    }

    #[test]
    fn test_rename_moves_content_atomically() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        manager.write_file("old.txt", "payload").unwrap();
        manager.rename_file("old.txt", "new.txt").unwrap();

        assert!(!manager.root().join("old.txt").exists());
        assert_eq!(manager.read_file("new.txt").unwrap(), "payload");
    }

    #[test]
    fn test_copy_escape_is_rejected_without_io() {
        // Root is a subdirectory so its parent exists on disk
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir(&root).unwrap();
        let mut manager = FileManager::new(&root).unwrap();

        manager.create_dir("sub").unwrap();
        manager.write_file("sub/a.txt", "x").unwrap();
        manager.change_dir("sub").unwrap();

        let result = manager.copy_file("a.txt", "../../escape.txt");
        assert!(matches!(result, Err(FsError::BoundaryViolation { .. })));
        assert!(!temp_dir.path().join("escape.txt").exists());
    }

    #[test]
    fn test_write_escape_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir(&root).unwrap();
        let manager = FileManager::new(&root).unwrap();

        let result = manager.write_file("../escape.txt", "x");
        assert!(matches!(result, Err(FsError::BoundaryViolation { .. })));
        assert!(!temp_dir.path().join("escape.txt").exists());
    }

    #[test]
    fn test_mkdir_escape_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir(&root).unwrap();
        let manager = FileManager::new(&root).unwrap();

        let result = manager.create_dir("../evil");
        assert!(matches!(result, Err(FsError::BoundaryViolation { .. })));
        assert!(!temp_dir.path().join("evil").exists());
    }

    #[test]
    fn test_list_dir_is_sorted_and_tagged() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        manager.write_file("b.txt", "x").unwrap();
        manager.create_dir("a_dir").unwrap();
        manager.write_file("c.txt", "x").unwrap();

        let entries = manager.list_dir().unwrap();
        let rendered: Vec<String> = entries.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["DIR\ta_dir", "FILE\tb.txt", "FILE\tc.txt"]);
    }

    #[test]
    fn test_list_empty_dir_is_empty_not_error() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_for(&temp_dir);

        let entries = manager.list_dir().unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_operations_are_relative_to_cursor() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_for(&temp_dir);

        manager.create_dir("sub").unwrap();
        manager.change_dir("sub").unwrap();
        manager.write_file("inner.txt", "here").unwrap();

        assert_eq!(
            fs::read_to_string(manager.root().join("sub/inner.txt")).unwrap(),
            "here"
        );
    }

    #[test]
    fn test_independent_managers_do_not_share_state() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        let mut manager_a = manager_for(&dir_a);
        let manager_b = manager_for(&dir_b);

        manager_a.create_dir("sub").unwrap();
        manager_a.change_dir("sub").unwrap();

        assert_eq!(manager_b.current_dir(), manager_b.root());
        assert_ne!(manager_a.current_dir(), manager_b.current_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_dangling_symlink_is_rejected() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();

        // The link's target does not exist yet; writing through it would
        // create the file outside the workspace
        symlink(
            outside_dir.path().join("escape.txt"),
            root_dir.path().join("evil"),
        )
        .unwrap();

        let manager = manager_for(&root_dir);
        let result = manager.write_file("evil", "pwned");
        assert!(matches!(result, Err(FsError::BoundaryViolation { .. })));
        assert!(!outside_dir.path().join("escape.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_to_dangling_symlink_is_rejected() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        symlink(
            outside_dir.path().join("copy.txt"),
            root_dir.path().join("out"),
        )
        .unwrap();

        let manager = manager_for(&root_dir);
        manager.write_file("a.txt", "payload").unwrap();

        let result = manager.copy_file("a.txt", "out");
        assert!(matches!(result, Err(FsError::BoundaryViolation { .. })));
        assert!(!outside_dir.path().join("copy.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_escaping_symlink_is_rejected() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        symlink(outside_dir.path(), root_dir.path().join("link")).unwrap();

        let manager = manager_for(&root_dir);
        let result = manager.write_file("link/escape.txt", "x");
        assert!(matches!(result, Err(FsError::BoundaryViolation { .. })));
        assert!(!outside_dir.path().join("escape.txt").exists());
    }
}
