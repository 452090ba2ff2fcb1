//! File discovery tools: `search_files`, `find_components`, `find_test_files`.

use rmcp::{ErrorData as McpError, model::*, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ProjectRoot, ToolSettings};
use crate::error::ToolResult;
use crate::fs::GlobSearch;
use crate::mcp::tools::{blocking, invalid_param, plural, resolve_all, respond, split_directories};

/// Default cap on files listed per directory group.
pub const DEFAULT_MAX_RESULTS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchFilesParams {
    #[schemars(description = "Glob pattern, e.g. '**/*.ts' or 'src/**/use*.tsx'")]
    pub pattern: String,
    #[schemars(
        description = "Directory to search, relative to the project root. Comma-separate several directories (default: '.')"
    )]
    pub directory: Option<String>,
    #[schemars(description = "Maximum files listed per directory (default: 100)")]
    pub max_results: Option<usize>,
}

/// UI framework whose component files to look for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
    Svelte,
    Angular,
    #[default]
    All,
}

impl Framework {
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            Framework::React => &["**/*.jsx", "**/*.tsx"],
            Framework::Vue => &["**/*.vue"],
            Framework::Svelte => &["**/*.svelte"],
            Framework::Angular => &["**/*.component.ts"],
            Framework::All => &[
                "**/*.jsx",
                "**/*.tsx",
                "**/*.vue",
                "**/*.svelte",
                "**/*.component.ts",
            ],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Svelte => "svelte",
            Framework::Angular => "angular",
            Framework::All => "all",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindComponentsParams {
    #[schemars(
        description = "Directory to search, relative to the project root. Comma-separate several directories (default: 'src')"
    )]
    pub directory: Option<String>,
    #[schemars(description = "Framework: react, vue, svelte, angular, or all (default: all)")]
    pub framework: Option<Framework>,
}

/// Kind of tests to look for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Unit,
    Integration,
    E2e,
    #[default]
    All,
}

const UNIT_PATTERNS: &[&str] = &[
    "**/*.test.{js,jsx,ts,tsx,mjs,cjs}",
    "**/*.spec.{js,jsx,ts,tsx,mjs,cjs}",
    "**/__tests__/**/*.{js,jsx,ts,tsx}",
    "**/test_*.py",
    "**/*_test.{py,go}",
];

const INTEGRATION_PATTERNS: &[&str] = &[
    "**/*.integration.{js,jsx,ts,tsx}",
    "**/*.integration.{test,spec}.{js,jsx,ts,tsx}",
    "**/integration/**/*.{js,jsx,ts,tsx,py}",
];

const E2E_PATTERNS: &[&str] = &[
    "**/*.e2e.{js,jsx,ts,tsx}",
    "**/*.e2e-spec.{js,ts}",
    "**/e2e/**/*.{js,jsx,ts,tsx}",
    "**/cypress/**/*.cy.{js,jsx,ts,tsx}",
];

impl TestType {
    /// Patterns for this type; `All` is the other three lists in order.
    pub fn patterns(self) -> Vec<&'static str> {
        match self {
            TestType::Unit => UNIT_PATTERNS.to_vec(),
            TestType::Integration => INTEGRATION_PATTERNS.to_vec(),
            TestType::E2e => E2E_PATTERNS.to_vec(),
            TestType::All => [UNIT_PATTERNS, INTEGRATION_PATTERNS, E2E_PATTERNS].concat(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            TestType::Unit => "unit",
            TestType::Integration => "integration",
            TestType::E2e => "e2e",
            TestType::All => "all",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindTestFilesParams {
    #[schemars(description = "Directory to search, relative to the project root (default: '.')")]
    pub directory: Option<String>,
    #[serde(rename = "type")]
    #[schemars(description = "Test type: unit, integration, e2e, or all (default: all)")]
    pub test_type: Option<TestType>,
}

/// Matches found under one requested directory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    label: String,
    files: Vec<String>,
}

pub(crate) async fn search_files(
    settings: &ToolSettings,
    params: SearchFilesParams,
) -> Result<CallToolResult, McpError> {
    debug!(?params, "search_files");

    let pattern = params.pattern.trim().to_string();
    if pattern.is_empty() {
        return Err(invalid_param("pattern", "must not be empty"));
    }
    let search =
        GlobSearch::new([pattern.as_str()]).map_err(|e| invalid_param("pattern", e.to_string()))?;
    let max_results = params.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    if max_results == 0 {
        return Err(invalid_param("max_results", "must be at least 1"));
    }
    let dirs = split_directories(params.directory.as_deref(), ".");

    let root = settings.root.clone();
    let result = blocking(move || search_groups(&root, &dirs, &search))
        .await
        .map(|groups| format_groups(&format!("matching `{pattern}`"), &groups, max_results));

    Ok(respond("search_files", result))
}

pub(crate) async fn find_components(
    settings: &ToolSettings,
    params: FindComponentsParams,
) -> Result<CallToolResult, McpError> {
    debug!(?params, "find_components");

    let framework = params.framework.unwrap_or_default();
    let search = GlobSearch::new(framework.patterns())
        .map_err(|e| invalid_param("framework", e.to_string()))?;
    let dirs = split_directories(params.directory.as_deref(), "src");

    let root = settings.root.clone();
    let result = blocking(move || search_groups(&root, &dirs, &search))
        .await
        .map(|groups| {
            format_groups(
                &format!("component files (framework: {})", framework.label()),
                &groups,
                usize::MAX,
            )
        });

    Ok(respond("find_components", result))
}

pub(crate) async fn find_test_files(
    settings: &ToolSettings,
    params: FindTestFilesParams,
) -> Result<CallToolResult, McpError> {
    debug!(?params, "find_test_files");

    let test_type = params.test_type.unwrap_or_default();
    let search =
        GlobSearch::new(test_type.patterns()).map_err(|e| invalid_param("type", e.to_string()))?;
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
        let files = search.run(&base)?;
        Ok(files
            .into_iter()
            .map(|file| root.display(&base.join(file)))
            .collect::<Vec<_>>())
    })
    .await
    .map(|files| {
        let mut out = format!(
            "Found {} (type: {})\n",
            plural(files.len(), "test file"),
            test_type.label()
        );
        if !files.is_empty() {
            out.push('\n');
            for file in &files {
                out.push_str(&format!("- {file}\n"));
            }
        }
        out
    });

    Ok(respond("find_test_files", result))
}

/// Search every directory in order. Any unusable directory fails the call.
fn search_groups(
    root: &ProjectRoot,
    dirs: &[String],
    search: &GlobSearch,
) -> ToolResult<Vec<Group>> {
    let bases = resolve_all(root, dirs)?;

    bases
        .into_iter()
        .map(|base| {
            let files = search
                .run(&base)?
                .into_iter()
                .map(|file| root.display(&base.join(file)))
                .collect();
            Ok(Group {
                label: root.display(&base),
                files,
            })
        })
        .collect()
}

fn format_groups(what: &str, groups: &[Group], max_results: usize) -> String {
    let total: usize = groups.iter().map(|g| g.files.len()).sum();
    let mut out = format!("Found {} {what}\n", plural(total, "file"));

    for group in groups {
        out.push_str(&format!("\n### {} ({})\n", group.label, group.files.len()));
        if group.files.is_empty() {
            out.push_str("_No matches_\n");
            continue;
        }
        for file in group.files.iter().take(max_results) {
            out.push_str(&format!("- {file}\n"));
        }
        if group.files.len() > max_results {
            out.push_str(&format!(
                "- ... and {} more\n",
                group.files.len() - max_results
            ));
        }
    }

    out
}
