use std::io;
use std::path::{Component, Path, PathBuf};

/// Errors that can occur while resolving a requested path.
#[derive(Debug, thiserror::Error)]
pub enum PathGuardError {
    #[error("Cannot resolve path '{path}': {source}")]
    Resolution { path: PathBuf, source: io::Error },
}

/// Resolves user-supplied paths and classifies them against the workspace
/// root.
///
/// The guard holds the canonical root established at startup. Callers
/// resolve every requested path through [`PathGuard::resolve`] and then ask
/// [`PathGuard::is_within_root`] whether the canonical result stays inside
/// the workspace. The guard never rejects a path itself: classification is
/// a plain boolean, and turning an out-of-bounds path into a user-facing
/// error is the caller's job.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Create a guard for the given root directory.
    ///
    /// The root must already exist; it is canonicalized once here so that
    /// every later comparison runs on canonical forms.
    pub fn new(root: &Path) -> io::Result<Self> {
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    /// The canonical workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a requested path relative to `current` into its canonical
    /// absolute form.
    ///
    /// The literal token `..` resolves to the parent of `current`. Absolute
    /// requests override `current`; relative ones are joined onto it. `.`
    /// and `..` components are collapsed lexically before any filesystem
    /// lookup, so `link/..` names the directory containing `link` rather
    /// than the parent of the link's target. The collapsed path is then
    /// canonicalized through the filesystem so symlinks, dangling ones
    /// included, resolve to their real targets. Targets that do not exist
    /// yet canonicalize through their nearest existing ancestor, keeping
    /// the trailing components verbatim.
    pub fn resolve(&self, current: &Path, requested: &str) -> Result<PathBuf, PathGuardError> {
        let joined = if requested == ".." {
            current.parent().unwrap_or(current).to_path_buf()
        } else {
            let requested = Path::new(requested);
            if requested.is_absolute() {
                requested.to_path_buf()
            } else {
                current.join(requested)
            }
        };

        canonicalize_lenient(&normalize(&joined))
    }

    /// Whether a canonical path equals the root or lies beneath it.
    ///
    /// Must only be called on paths produced by [`PathGuard::resolve`];
    /// comparing raw strings would let `..` sequences or symlinks slip
    /// through.
    pub fn is_within_root(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Upper bound on symlink hops while resolving non-existent targets.
const MAX_SYMLINK_HOPS: usize = 32;

/// Canonicalize a path, walking up through trailing components that do not
/// exist yet.
fn canonicalize_lenient(path: &Path) -> Result<PathBuf, PathGuardError> {
    canonicalize_with_hops(path, 0)
}

fn canonicalize_with_hops(path: &Path, hops: usize) -> Result<PathBuf, PathGuardError> {
    match path.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // A dangling symlink also reports NotFound. Its target must be
            // resolved like any other symlink; keeping the link's own name
            // verbatim would make a link to the outside look in-bounds.
            if is_symlink(path) {
                if hops >= MAX_SYMLINK_HOPS {
                    return Err(PathGuardError::Resolution {
                        path: path.to_path_buf(),
                        source: io::Error::other("too many levels of symbolic links"),
                    });
                }
                let target = path.read_link().map_err(|source| PathGuardError::Resolution {
                    path: path.to_path_buf(),
                    source,
                })?;
                let resolved = if target.is_absolute() {
                    target
                } else {
                    match path.parent() {
                        Some(parent) => canonicalize_with_hops(parent, hops)?.join(target),
                        None => target,
                    }
                };
                return canonicalize_with_hops(&normalize(&resolved), hops + 1);
            }
            match (path.parent(), path.file_name()) {
                (Some(parent), Some(name)) => {
                    Ok(canonicalize_with_hops(parent, hops)?.join(name))
                }
                _ => Err(PathGuardError::Resolution {
                    path: path.to_path_buf(),
                    source: e,
                }),
            }
        }
        Err(e) => Err(PathGuardError::Resolution {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false)
}
