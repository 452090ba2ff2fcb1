//! `get_pr_ai_prompt` tool (also registered as `generate_pr_description`).
//!
//! Assembles a prompt an agent can feed to its own model to write a pull
//! request description. Nothing here calls a model.

use std::sync::Arc;

use rmcp::{ErrorData as McpError, model::*, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ProjectRoot, ToolSettings};
use crate::git::{DiffOptions, DiffReport, GitOps};
use crate::mcp::tools::git::{change_summary, fetch_report, target_branch, truncate_diff};
use crate::mcp::tools::{invalid_param, respond};

/// Location of the PR template, relative to the project root.
pub const TEMPLATE_PATH: &str = ".github/pull_request_template.md";

/// Used when the project has no readable PR template.
pub const DEFAULT_TEMPLATE: &str = "## Summary\n\
<!-- What does this PR do and why? -->\n\
\n\
## Changes\n\
<!-- Notable changes, grouped by area -->\n\
\n\
## Testing\n\
<!-- How was this verified? -->\n\
\n\
## Notes for Reviewers\n\
<!-- Risks, follow-ups, screenshots -->\n";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetPrPromptParams {
    #[schemars(description = "Branch the PR will merge into (default: 'main')")]
    pub target_branch: Option<String>,
    #[schemars(description = "Ticket or issue identifier to reference, e.g. 'PROJ-123' (optional)")]
    pub ticket: Option<String>,
    #[schemars(description = "Include the full diff in the prompt (default: true)")]
    pub include_diff: Option<bool>,
}

/// Where the template text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Project,
    BuiltIn,
}

/// Read the project's PR template, falling back to [`DEFAULT_TEMPLATE`].
pub async fn load_template(root: &ProjectRoot) -> (String, TemplateSource) {
    let path = root.path().join(TEMPLATE_PATH);
    match tokio::fs::read_to_string(&path).await {
        Ok(text) if !text.trim().is_empty() => (text, TemplateSource::Project),
        Ok(_) => (DEFAULT_TEMPLATE.to_string(), TemplateSource::BuiltIn),
        Err(err) => {
            debug!("No PR template at {}: {}", path.display(), err);
            (DEFAULT_TEMPLATE.to_string(), TemplateSource::BuiltIn)
        }
    }
}

pub(crate) async fn get_pr_ai_prompt<G>(
    tool: &str,
    settings: &ToolSettings,
    git: &Arc<G>,
    params: GetPrPromptParams,
) -> Result<CallToolResult, McpError>
where
    G: GitOps + Send + Sync + 'static,
{
    debug!(tool, ?params, "get_pr_ai_prompt");

    let target = target_branch(params.target_branch)?;
    let ticket = params
        .ticket
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    if ticket.as_deref().is_some_and(|t| t.contains('\n')) {
        return Err(invalid_param("ticket", "must be a single line"));
    }

    let options = DiffOptions {
        target_branch: target,
        include_commits: true,
        include_diff: params.include_diff.unwrap_or(true),
    };

    let result = match fetch_report(settings, git, options).await {
        Ok(report) => {
            let (template, source) = load_template(&settings.root).await;
            debug!(?source, "Loaded PR template");
            Ok(build_prompt(
                &report,
                &template,
                ticket.as_deref(),
                settings.max_diff_chars,
            ))
        }
        Err(err) => Err(err),
    };

    Ok(respond(tool, result))
}

/// Assemble the full prompt text.
pub fn build_prompt(
    report: &DiffReport,
    template: &str,
    ticket: Option<&str>,
    max_diff_chars: usize,
) -> String {
    let mut out = String::from(
        "You are writing the description for a pull request. \
         Fill in the template below using the branch information, commits, and diff that follow. \
         Be concise and explain why the change was made, not only what changed. \
         Do not invent changes that are not shown.\n\n",
    );

    out.push_str("## Context\n");
    out.push_str(&format!("- Branch: {}\n", report.current_branch));
    out.push_str(&format!("- Target: {}\n", report.target_branch));
    out.push_str(&format!("- {}\n", change_summary(report)));
    if let Some(ticket) = ticket {
        out.push_str(&format!(
            "- Ticket: {ticket} (reference it in the description)\n"
        ));
    }

    out.push_str(&format!("\n## Template\n{}\n", template.trim_end()));

    out.push_str("\n## Changed Files\n");
    if report.changed_files.is_empty() {
        out.push_str("_None_\n");
    }
    for file in &report.changed_files {
        out.push_str(&format!("- {file}\n"));
    }

    if let Some(commits) = report.commits.available().filter(|c| !c.is_empty()) {
        out.push_str("\n## Commits\n");
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
