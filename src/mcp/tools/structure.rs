//! `get_project_structure` tool.

use rmcp::{ErrorData as McpError, model::*, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ToolSettings;
use crate::fs::render_tree;
use crate::mcp::tools::{blocking, invalid_param, respond};

pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetProjectStructureParams {
    #[schemars(description = "Directory to render, relative to the project root (default: '.')")]
    pub directory: Option<String>,
    #[schemars(description = "Maximum depth to descend, at least 1 (default: 3)")]
    pub max_depth: Option<usize>,
}

pub(crate) async fn get_project_structure(
    settings: &ToolSettings,
    params: GetProjectStructureParams,
) -> Result<CallToolResult, McpError> {
    debug!(?params, "get_project_structure");

    let max_depth = params.max_depth.unwrap_or(DEFAULT_MAX_DEPTH);
    if max_depth == 0 {
        return Err(invalid_param("max_depth", "must be at least 1"));
    }
    let directory = params
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(".")
        .to_string();

    let root = settings.root.clone();
    let result = blocking(move || {
        let start = root.join(&directory)?;
        let lines = render_tree(&start, max_depth)?;
        Ok((root.display(&start), lines))
    })
    .await
    .map(|(label, lines)| {
        let body = if lines.is_empty() {
            "(empty)".to_string()
        } else {
            lines.join("\n")
        };
        format!("Project structure of `{label}` (max depth {max_depth}):\n\n```\n{body}\n```\n")
    });

    Ok(respond("get_project_structure", result))
}
