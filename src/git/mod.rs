//! Read-only git queries.
//!
//! - **ops**: trait-based abstraction over the `git` binary, mockable in tests
//! - **report**: gathers branch/changed files/commits/diff with the
//!   fatal-versus-degradable split the diff tools rely on

mod ops;
mod report;


#[cfg(test)]
pub use ops::MockGitOps;
pub use ops::{GitError, GitOps, RealGit};
pub use report::{DiffOptions, DiffReport, Section, collect_report};
