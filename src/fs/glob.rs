//! Glob-based file enumeration.
//!
//! Walks a directory once with [`ignore::WalkBuilder`] and matches every file
//! path (relative to the walk base, `/`-separated) against compiled
//! [`globset`] patterns. Dot-entries and the dependency cache directory are
//! pruned. Ignore files (`.gitignore`, `.ignore`, git excludes) are not
//! consulted, so the walk sees the same entries the tree renderer lists.

use std::collections::HashSet;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use tracing::warn;

use super::{FsError, tree::is_excluded};

/// A set of glob patterns evaluated in declaration order.
#[derive(Debug, Clone)]
pub struct GlobSearch {
    matchers: Vec<GlobMatcher>,
}

impl GlobSearch {
    /// Compile `patterns`. `*` never crosses a `/`; use `**` for that.
    pub fn new<I, S>(patterns: I) -> Result<Self, FsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map(|glob| glob.compile_matcher())
                    .map_err(|e| FsError::InvalidPattern {
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { matchers })
    }

    /// Files under `base` matching any pattern.
    ///
    /// Results are grouped by pattern (all matches of the first pattern, then
    /// new matches of the second, ...) and deduplicated by exact path, keeping
    /// the first occurrence. Within one pattern paths follow walk order, which
    /// is sorted by file name.
    pub fn run(&self, base: &Path) -> Result<Vec<String>, FsError> {
        let files = list_files(base)?;

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for matcher in &self.matchers {
            for file in &files {
                if matcher.is_match(file.as_str()) && seen.insert(file.as_str()) {
                    results.push(file.clone());
                }
            }
        }

        Ok(results)
    }
}

/// Convenience wrapper for a single pattern.
pub fn find_files(base: &Path, pattern: &str) -> Result<Vec<String>, FsError> {
    GlobSearch::new([pattern])?.run(base)
}

/// Every non-excluded file below `base`, relative to it.
fn list_files(base: &Path) -> Result<Vec<String>, FsError> {
    let metadata = std::fs::metadata(base).map_err(|e| FsError::from_io(base, e))?;
    if !metadata.is_dir() {
        return Err(FsError::NotADirectory {
            path: base.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(base)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        // depth 0 is the base itself, whose name is not ours to judge
        .filter_entry(|entry| {
            entry.depth() == 0 || !is_excluded(&entry.file_name().to_string_lossy())
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", base.display(), err);
                continue;
            }
        };

        if !entry.path().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(base) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(relative);
    }

    Ok(files)
}
