//! MCP tool implementations
//!
//! Each module owns the parameter types and execution logic for one group of
//! tools; [`crate::mcp::DevLensServer`] registers them with the router.
//!
//! Handlers follow one contract: malformed parameters are rejected with an
//! `invalid_params` protocol error before any filesystem or git access, and
//! every failure after that point comes back as a successful result whose
//! text starts with `Error:`.

pub mod files;
pub mod git;
pub mod graphql;
pub mod packages;
pub mod pr_prompt;
pub mod structure;

#[cfg(test)]
mod files_test;
#[cfg(test)]
pub(crate) mod test_support;

use std::path::PathBuf;

use rmcp::{ErrorData as McpError, model::*};
use serde_json::json;
use tracing::warn;

use crate::config::{ProjectRoot, ToolSettings};
use crate::error::{ToolError, ToolResult};
use crate::git::GitError;

/// Convert a tool outcome into the text envelope returned to the host.
///
/// Execution errors never become protocol errors.
pub(crate) fn respond(tool: &str, result: ToolResult<String>) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(err) => {
            warn!(tool, error = %err, "Tool execution failed");
            CallToolResult::success(vec![Content::text(format!("Error: {err}"))])
        }
    }
}

/// Build an `invalid_params` error for a rejected argument.
pub(crate) fn invalid_param(field: &str, message: impl Into<String>) -> McpError {
    let message = message.into();
    McpError::invalid_params(
        "invalid_parameter",
        Some(json!({
            "field": field,
            "error": message,
        })),
    )
}

/// Run blocking filesystem work off the async executor.
pub(crate) async fn blocking<T, F>(work: F) -> ToolResult<T>
where
    F: FnOnce() -> ToolResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

/// Run a blocking git query, bounded by the configured timeout.
///
/// On timeout the call fails but the subprocess thread is left to finish on
/// its own; it cannot be cancelled from here.
pub(crate) async fn run_git<T, F>(settings: &ToolSettings, query: F) -> ToolResult<T>
where
    F: FnOnce() -> Result<T, GitError> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(query);
    match tokio::time::timeout(settings.git_timeout, handle).await {
        Ok(joined) => Ok(joined??),
        Err(_) => Err(ToolError::ExternalCommand(GitError::TimedOut(
            settings.git_timeout.as_secs(),
        ))),
    }
}

/// Split a comma-separated directory argument, defaulting to `default`.
pub(crate) fn split_directories(arg: Option<&str>, default: &str) -> Vec<String> {
    let dirs: Vec<String> = arg
        .unwrap_or(default)
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();

    if dirs.is_empty() {
        vec![default.to_string()]
    } else {
        dirs
    }
}

/// Resolve each directory argument under the root.
pub(crate) fn resolve_all(root: &ProjectRoot, dirs: &[String]) -> ToolResult<Vec<PathBuf>> {
    dirs.iter()
        .map(|dir| root.join(dir).map_err(ToolError::from))
        .collect()
}

/// Reject refs git could mistake for options or that cannot name a branch.
pub(crate) fn validate_ref(field: &str, value: &str) -> Result<(), McpError> {
    if value.is_empty() {
        return Err(invalid_param(field, "must not be empty"));
    }
    if value.starts_with('-') {
        return Err(invalid_param(field, "must not start with '-'"));
    }
    if value.chars().any(char::is_whitespace) || value.contains("..") {
        return Err(invalid_param(
            field,
            "must be a branch or commit name without whitespace or '..'",
        ));
    }
    Ok(())
}

/// Pluralize `noun` for `count`.
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
