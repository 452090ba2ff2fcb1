//! `get_git_diff` tool.

use std::sync::Arc;

use rmcp::{ErrorData as McpError, model::*, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ToolSettings;
use crate::error::ToolResult;
use crate::git::{DiffOptions, DiffReport, GitOps, collect_report};
use crate::mcp::tools::{plural, respond, run_git, validate_ref};

pub const DEFAULT_TARGET_BRANCH: &str = "main";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetGitDiffParams {
    #[schemars(description = "Branch to compare against (default: 'main')")]
    pub target_branch: Option<String>,
    #[schemars(description = "Include the commit log since the target branch (default: true)")]
    pub include_commits: Option<bool>,
    #[schemars(description = "Include the full diff text (default: true)")]
    pub include_diff: Option<bool>,
}

/// Validate a target branch argument, applying the default.
pub(crate) fn target_branch(value: Option<String>) -> Result<String, McpError> {
    let target = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_TARGET_BRANCH.to_string());
    validate_ref("target_branch", &target)?;
    Ok(target)
}

/// Gather a report off the async executor under the git timeout.
pub(crate) async fn fetch_report<G>(
    settings: &ToolSettings,
    git: &Arc<G>,
    options: DiffOptions,
) -> ToolResult<DiffReport>
where
    G: GitOps + Send + Sync + 'static,
{
    let git = Arc::clone(git);
    let repo = settings.root.path().to_path_buf();
    run_git(settings, move || collect_report(&*git, &repo, &options)).await
}

pub(crate) async fn get_git_diff<G>(
    settings: &ToolSettings,
    git: &Arc<G>,
    params: GetGitDiffParams,
) -> Result<CallToolResult, McpError>
where
    G: GitOps + Send + Sync + 'static,
{
    debug!(?params, "get_git_diff");

    let options = DiffOptions {
        target_branch: target_branch(params.target_branch)?,
        include_commits: params.include_commits.unwrap_or(true),
        include_diff: params.include_diff.unwrap_or(true),
    };

    let result = fetch_report(settings, git, options)
        .await
        .map(|report| format_report(&report, settings.max_diff_chars));

    Ok(respond("get_git_diff", result))
}

/// Cut diff text to `max_chars` characters, noting how much was dropped.
pub(crate) fn truncate_diff(diff: &str, max_chars: usize) -> String {
    match diff.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let dropped = diff[byte_idx..].chars().count();
            format!(
                "{}\n... (diff truncated, {dropped} more characters)",
                &diff[..byte_idx]
            )
        }
        None => diff.to_string(),
    }
}

fn format_report(report: &DiffReport, max_diff_chars: usize) -> String {
    let mut out = String::from("# Git Diff Summary\n\n");
    out.push_str(&format!("- Current Branch: {}\n", report.current_branch));
    out.push_str(&format!("- Target Branch: {}\n", report.target_branch));
    out.push_str(&format!("- Files Changed: {}\n", report.changed_files.len()));

    if !report.changed_files.is_empty() {
        out.push_str("\n## Changed Files\n");
        for file in &report.changed_files {
            out.push_str(&format!("- {file}\n"));
        }
    }

    if let Some(commits) = report.commits.available() {
        out.push_str(&format!("\n## Commits ({})\n", commits.len()));
        if commits.is_empty() {
            out.push_str(&format!("_No commits ahead of {}_\n", report.target_branch));
        }
        for commit in commits {
            out.push_str(&format!("- {commit}\n"));
        }
    }

    if let Some(diff) = report.diff.available().filter(|d| !d.trim().is_empty()) {
        out.push_str(&format!(
            "\n## Diff\n```diff\n{}\n```\n",
            truncate_diff(diff.trim_end(), max_diff_chars)
        ));
    }

    out
}

/// Summary line used by callers that only need counts.
pub(crate) fn change_summary(report: &DiffReport) -> String {
    format!(
        "{} changed on `{}` relative to `{}`",
        plural(report.changed_files.len(), "file"),
        report.current_branch,
        report.target_branch
    )
}
