//! Directory tree rendering.
//!
//! Produces an indentation-based listing of a directory subtree:
//!
//! ```text
//! 📁 src/
//!   📄 lib.rs
//!   📁 fs/
//!     📄 tree.rs
//! 📄 Cargo.toml
//! ```
//!
//! Entries appear in the order `read_dir` yields them. No sorting is applied,
//! so sibling order is platform and filesystem dependent.

use std::path::Path;

use super::FsError;

/// Dependency cache directory that is never listed or descended into.
pub const DEPENDENCY_DIR: &str = "node_modules";

const INDENT: &str = "  ";
const DIR_MARKER: &str = "📁";
const FILE_MARKER: &str = "📄";

/// Returns true for entries the tree (and the glob walker) always skip:
/// dot-entries and the dependency cache directory.
pub fn is_excluded(name: &str) -> bool {
    name.starts_with('.') || name == DEPENDENCY_DIR
}

/// Render the subtree below `start`, listing entries down to depth
/// `max_depth - 1` (depth 0 being the immediate children of `start`).
///
/// Directories at the last visible depth are listed without children.
/// Any failure to list or classify a visited entry fails the whole render.
///
/// # Errors
/// - [`FsError::NotFound`] / [`FsError::NotADirectory`] when `start` is unusable
/// - [`FsError::PermissionDenied`] when any visited entry cannot be read
pub fn render_tree(start: &Path, max_depth: usize) -> Result<Vec<String>, FsError> {
    let metadata = std::fs::metadata(start).map_err(|e| FsError::from_io(start, e))?;
    if !metadata.is_dir() {
        return Err(FsError::NotADirectory {
            path: start.to_path_buf(),
        });
    }

    let mut lines = Vec::new();
    walk(start, 0, max_depth, &mut lines)?;
    Ok(lines)
}

fn walk(
    dir: &Path,
    depth: usize,
    max_depth: usize,
    lines: &mut Vec<String>,
) -> Result<(), FsError> {
    if depth >= max_depth {
        return Ok(());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))?;
    let indent = INDENT.repeat(depth);

    for entry in entries {
        let entry = entry.map_err(|e| FsError::from_io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_excluded(&name) {
            continue;
        }

        let path = entry.path();
        // metadata() follows symlinks, so a dangling link fails here
        let metadata = std::fs::metadata(&path).map_err(|e| FsError::from_io(&path, e))?;

        if metadata.is_dir() {
            lines.push(format!("{indent}{DIR_MARKER} {name}/"));
            walk(&path, depth + 1, max_depth, lines)?;
        } else {
            lines.push(format!("{indent}{FILE_MARKER} {name}"));
        }
    }

    Ok(())
}
