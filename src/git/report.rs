//! Branch comparison report.
//!
//! The current branch and the changed-file list are required: if either query
//! fails the whole report fails. Commit log and diff text are auxiliary and
//! degrade to [`Section::Unavailable`] on failure.

use std::path::Path;

use tracing::warn;

use super::{GitError, GitOps};

/// Which parts of the comparison to gather.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    pub target_branch: String,
    pub include_commits: bool,
    pub include_diff: bool,
}

/// An auxiliary report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<T> {
    /// Not requested.
    Skipped,
    Available(T),
    /// Requested but the query failed. The cause is logged, not kept.
    Unavailable,
}

impl<T> Section<T> {
    fn gather(include: bool, what: &str, query: impl FnOnce() -> Result<T, GitError>) -> Self {
        if !include {
            return Section::Skipped;
        }
        match query() {
            Ok(value) => Section::Available(value),
            Err(err) => {
                warn!("Omitting {} from report: {}", what, err);
                Section::Unavailable
            }
        }
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Section::Available(value) => Some(value),
            _ => None,
        }
    }
}

/// Comparison of the current branch against a target branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub current_branch: String,
    pub target_branch: String,
    pub changed_files: Vec<String>,
    pub commits: Section<Vec<String>>,
    pub diff: Section<String>,
}

/// Gather a [`DiffReport`] for the work tree at `repo`.
pub fn collect_report<G: GitOps + ?Sized>(
    git: &G,
    repo: &Path,
    options: &DiffOptions,
) -> Result<DiffReport, GitError> {
    let target = options.target_branch.as_str();

    let current_branch = git.current_branch(repo)?;
    let changed_files = git.changed_files(repo, target)?;
    let commits = Section::gather(options.include_commits, "commit log", || {
        git.commit_log(repo, target)
    });
    let diff = Section::gather(options.include_diff, "diff", || git.diff_text(repo, target));

    Ok(DiffReport {
        current_branch,
        target_branch: options.target_branch.clone(),
        changed_files,
        commits,
        diff,
    })
}
