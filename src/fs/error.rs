//! Filesystem error types.

use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while walking or reading the project tree.
#[derive(Error, Diagnostic, Debug)]
pub enum FsError {
    #[error("Path does not exist: {}", path.display())]
    #[diagnostic(code(devlens::fs::not_found))]
    NotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    #[diagnostic(code(devlens::fs::not_a_directory))]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    #[diagnostic(code(devlens::fs::permission_denied))]
    PermissionDenied { path: PathBuf },

    #[error("Path escapes the project root: {path}")]
    #[diagnostic(
        code(devlens::fs::outside_root),
        help("Use a path relative to the project root without leading '..' segments")
    )]
    OutsideRoot { path: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    #[diagnostic(code(devlens::fs::invalid_pattern))]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to read {}: {message}", path.display())]
    #[diagnostic(code(devlens::fs::io))]
    Io { path: PathBuf, message: String },
}

impl FsError {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path },
            _ => FsError::Io {
                path,
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classifies_kinds() {
        let path = Path::new("/tmp/x");

        let err = FsError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, FsError::NotFound { .. }));

        let err = FsError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, FsError::PermissionDenied { .. }));

        let err = FsError::from_io(path, io::Error::other("disk on fire"));
        match err {
            FsError::Io { message, .. } => assert!(message.contains("disk on fire")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
