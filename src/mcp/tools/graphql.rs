//! `get_graphql_schemas` tool.

use rmcp::{ErrorData as McpError, model::*, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ToolSettings;
use crate::fs::{FsError, GlobSearch};
use crate::mcp::tools::{blocking, invalid_param, plural, respond};

/// Schema content longer than this many characters is cut in the output.
pub const CONTENT_PREVIEW_CHARS: usize = 500;
const TRUNCATION_MARKER: &str = "\n... (truncated)";

const SCHEMA_PATTERNS: &[&str] = &["**/*.graphql", "**/*.graphqls", "**/*.gql"];

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetGraphqlSchemasParams {
    #[schemars(description = "Directory to search, relative to the project root (default: '.')")]
    pub directory: Option<String>,
    #[schemars(
        description = "Include a preview of each schema (first 500 characters). Default: true"
    )]
    pub include_content: Option<bool>,
}

/// A matched schema file with its full content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    pub path: String,
    pub content: Option<String>,
}

pub(crate) async fn get_graphql_schemas(
    settings: &ToolSettings,
    params: GetGraphqlSchemasParams,
) -> Result<CallToolResult, McpError> {
    debug!(?params, "get_graphql_schemas");

    let search =
        GlobSearch::new(SCHEMA_PATTERNS).map_err(|e| invalid_param("pattern", e.to_string()))?;
    let include_content = params.include_content.unwrap_or(true);
    let directory = params
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(".")
        .to_string();

    let root = settings.root.clone();
    let result = blocking(move || {
        let base = root.join(&directory)?;
        let mut schemas = Vec::new();
        for file in search.run(&base)? {
            let path = base.join(&file);
            let content = if include_content {
                let bytes = std::fs::read(&path).map_err(|e| FsError::from_io(&path, e))?;
                Some(String::from_utf8_lossy(&bytes).into_owned())
            } else {
                None
            };
            schemas.push(SchemaFile {
                path: root.display(&path),
                content,
            });
        }
        Ok(schemas)
    })
    .await
    .map(|schemas| format_schemas(&schemas));

    Ok(respond("get_graphql_schemas", result))
}

/// Cut `content` to the preview length, marking the cut.
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(CONTENT_PREVIEW_CHARS) {
        Some((byte_idx, _)) => format!("{}{TRUNCATION_MARKER}", &content[..byte_idx]),
        None => content.to_string(),
    }
}

fn format_schemas(schemas: &[SchemaFile]) -> String {
    let mut out = format!("Found {}\n", plural(schemas.len(), "GraphQL schema file"));

    for schema in schemas {
        match &schema.content {
            Some(content) => {
                out.push_str(&format!(
                    "\n### {}\n```graphql\n{}\n```\n",
                    schema.path,
                    preview(content.trim_end())
                ));
            }
            None => out.push_str(&format!("- {}\n", schema.path)),
        }
    }

    out
}
