//! Project root resolution.

use std::path::{Component, Path, PathBuf};

use super::ConfigError;
use crate::fs::FsError;

/// Canonical absolute directory all tool paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Canonicalize `path` and check that it is a directory.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let canonical = path.canonicalize().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::RootNotFound(path.display().to_string())
            } else {
                ConfigError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        if !canonical.is_dir() {
            return Err(ConfigError::RootNotADirectory(
                canonical.display().to_string(),
            ));
        }

        Ok(Self(canonical))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Resolve a user-supplied directory argument below the root.
    ///
    /// Resolution is lexical: `..` may step back up but never above the
    /// root. Absolute paths are accepted only when they lie under the root.
    /// Existence is not checked here.
    pub fn join(&self, relative: &str) -> Result<PathBuf, FsError> {
        let trimmed = relative.trim();
        let candidate = Path::new(trimmed);

        let candidate = if candidate.is_absolute() {
            candidate
                .strip_prefix(&self.0)
                .map_err(|_| FsError::OutsideRoot {
                    path: trimmed.to_string(),
                })?
        } else {
            candidate
        };

        let mut resolved = self.0.clone();
        let mut depth = 0usize;
        for component in candidate.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(part) => {
                    resolved.push(part);
                    depth += 1;
                }
                Component::ParentDir if depth > 0 => {
                    resolved.pop();
                    depth -= 1;
                }
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FsError::OutsideRoot {
                        path: trimmed.to_string(),
                    });
                }
            }
        }

        Ok(resolved)
    }

    /// `path` relative to the root for display, `.` for the root itself.
    pub fn display(&self, path: &Path) -> String {
        match path.strip_prefix(&self.0) {
            Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
            Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
            Err(_) => path.display().to_string(),
        }
    }
}
