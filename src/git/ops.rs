//! Git operations used by the diff and PR tools.
//!
//! This module provides a trait-based abstraction over git commands
//! to enable easy mocking in tests.

use miette::Diagnostic;
use std::path::Path;
use std::process::{Command, Output};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Errors that can occur during git operations.
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum GitError {
    #[error("Git command failed: {0}")]
    #[diagnostic(code(devlens::git::command_failed))]
    CommandFailed(String),

    #[error("Git command returned non-zero exit code {code}: {output}")]
    #[diagnostic(code(devlens::git::non_zero_exit))]
    NonZeroExit { code: i32, output: String },

    #[error("Git not installed or not in PATH")]
    #[diagnostic(code(devlens::git::not_found))]
    GitNotFound,

    #[error("Git command timed out after {0} seconds")]
    #[diagnostic(
        code(devlens::git::timed_out),
        help("Raise --git-timeout-secs if the repository is very large")
    )]
    TimedOut(u64),
}

/// Read-only queries against a git work tree. Each may fail independently.
#[cfg_attr(test, automock)]
pub trait GitOps {
    /// Name of the currently checked-out branch (`HEAD` when detached).
    fn current_branch(&self, repo: &Path) -> Result<String, GitError>;

    /// Paths changed on this branch since it diverged from `from_ref`.
    fn changed_files(&self, repo: &Path, from_ref: &str) -> Result<Vec<String>, GitError>;

    /// One-line commit summaries reachable from HEAD but not from `from_ref`.
    fn commit_log(&self, repo: &Path, from_ref: &str) -> Result<Vec<String>, GitError>;

    /// Unified diff of this branch since it diverged from `from_ref`.
    fn diff_text(&self, repo: &Path, from_ref: &str) -> Result<String, GitError>;
}

/// Real implementation of GitOps using std::process::Command.
#[derive(Clone, Copy, Debug)]
pub struct RealGit;

impl RealGit {
    pub fn new() -> Self {
        Self
    }

    /// Helper to run a git command and return the output.
    fn run_git(&self, repo: &Path, args: &[&str]) -> Result<Output, GitError> {
        Command::new("git")
            .args(args)
            .current_dir(repo)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GitError::GitNotFound
                } else {
                    GitError::CommandFailed(e.to_string())
                }
            })
    }

    /// Run a git command and return its stdout, failing on non-zero exit.
    fn git_stdout(&self, repo: &Path, args: &[&str]) -> Result<String, GitError> {
        let output = self.run_git(repo, args)?;
        check_output(output).map(|output| String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for RealGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitOps for RealGit {
    fn current_branch(&self, repo: &Path) -> Result<String, GitError> {
        let stdout = self.git_stdout(repo, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(stdout.trim().to_string())
    }

    fn changed_files(&self, repo: &Path, from_ref: &str) -> Result<Vec<String>, GitError> {
        let range = format!("{from_ref}...HEAD");
        let stdout = self.git_stdout(repo, &["diff", "--name-only", &range])?;
        Ok(non_empty_lines(&stdout))
    }

    fn commit_log(&self, repo: &Path, from_ref: &str) -> Result<Vec<String>, GitError> {
        let range = format!("{from_ref}..HEAD");
        let stdout = self.git_stdout(repo, &["log", "--oneline", &range])?;
        Ok(non_empty_lines(&stdout))
    }

    fn diff_text(&self, repo: &Path, from_ref: &str) -> Result<String, GitError> {
        let range = format!("{from_ref}...HEAD");
        self.git_stdout(repo, &["diff", &range])
    }
}

/// Check if the output indicates success, otherwise return an error.
pub(crate) fn check_output(output: Output) -> Result<Output, GitError> {
    if output.status.success() {
        Ok(output)
    } else {
        let code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let combined = match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{}\n{}", stdout, stderr),
            (false, true) => stdout,
            _ => stderr,
        };
        Err(GitError::NonZeroExit {
            code,
            output: combined,
        })
    }
}

pub(crate) fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
