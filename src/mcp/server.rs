//! MCP server implementation
//!
//! Registers every project inspection tool with the rmcp router. Tool logic
//! lives in [`super::tools`]; the methods here only forward to it.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::config::ToolSettings;
use crate::git::{GitOps, RealGit};

use super::tools::{
    files::{self, FindComponentsParams, FindTestFilesParams, SearchFilesParams},
    git::{self, GetGitDiffParams},
    graphql::{self, GetGraphqlSchemasParams},
    packages::{self, GetPackageInfoParams},
    pr_prompt::{self, GetPrPromptParams},
    structure::{self, GetProjectStructureParams},
};

/// Project inspection MCP server
///
/// Generic over `G: GitOps` so tests can substitute a mock git layer.
/// All state is immutable and shared through `Arc`, so concurrent tool calls
/// need no coordination.
pub struct DevLensServer<G: GitOps = RealGit> {
    settings: Arc<ToolSettings>,
    git: Arc<G>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl<G: GitOps> Clone for DevLensServer<G> {
    fn clone(&self) -> Self {
        Self {
            settings: Arc::clone(&self.settings),
            git: Arc::clone(&self.git),
            tool_router: self.tool_router.clone(),
        }
    }
}

impl DevLensServer<RealGit> {
    /// Create a server that shells out to the real `git` binary.
    pub fn new(settings: ToolSettings) -> Self {
        Self::with_git(settings, RealGit::new())
    }
}

#[tool_router]
impl<G: GitOps + Send + Sync + 'static> DevLensServer<G> {
    /// Create a server with an injected git implementation.
    pub fn with_git(settings: ToolSettings, git: G) -> Self {
        Self {
            settings: Arc::new(settings),
            git: Arc::new(git),
            tool_router: Self::tool_router(),
        }
    }

    /// Settings shared by all tools.
    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    #[tool(
        description = "Find files matching a glob pattern. Accepts several comma-separated directories; results are grouped per directory.",
        annotations(read_only_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    pub async fn search_files(
        &self,
        params: Parameters<SearchFilesParams>,
    ) -> Result<CallToolResult, McpError> {
        files::search_files(&self.settings, params.0).await
    }

    #[tool(
        description = "Find UI component files (React, Vue, Svelte, Angular) under one or more comma-separated directories. Default directory: src",
        annotations(read_only_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    pub async fn find_components(
        &self,
        params: Parameters<FindComponentsParams>,
    ) -> Result<CallToolResult, McpError> {
        files::find_components(&self.settings, params.0).await
    }

    #[tool(
        description = "List GraphQL schema files (.graphql, .graphqls, .gql) with an optional 500-character preview of each",
        annotations(read_only_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    pub async fn get_graphql_schemas(
        &self,
        params: Parameters<GetGraphqlSchemasParams>,
    ) -> Result<CallToolResult, McpError> {
        graphql::get_graphql_schemas(&self.settings, params.0).await
    }

    #[tool(
        description = "Render the directory tree of the project or a subdirectory. Hidden entries and node_modules are skipped. Default max_depth: 3",
        annotations(read_only_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    pub async fn get_project_structure(
        &self,
        params: Parameters<GetProjectStructureParams>,
    ) -> Result<CallToolResult, McpError> {
        structure::get_project_structure(&self.settings, params.0).await
    }

    #[tool(
        description = "Find test files by type: unit, integration, e2e, or all",
        annotations(read_only_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    pub async fn find_test_files(
        &self,
        params: Parameters<FindTestFilesParams>,
    ) -> Result<CallToolResult, McpError> {
        files::find_test_files(&self.settings, params.0).await
    }

    #[tool(
        description = "Summarize package.json manifests (name, version, scripts, dependencies), optionally for one package name",
        annotations(read_only_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    pub async fn get_package_info(
        &self,
        params: Parameters<GetPackageInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        packages::get_package_info(&self.settings, params.0).await
    }

    #[tool(
        description = "Compare the current branch with a target branch: changed files, commit log, and diff",
        annotations(read_only_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    pub async fn get_git_diff(
        &self,
        params: Parameters<GetGitDiffParams>,
    ) -> Result<CallToolResult, McpError> {
        git::get_git_diff(&self.settings, &self.git, params.0).await
    }

    #[tool(
        description = "Build a prompt for writing a pull request description from the branch changes and the project's PR template. Returns the prompt text only.",
        annotations(read_only_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    pub async fn get_pr_ai_prompt(
        &self,
        params: Parameters<GetPrPromptParams>,
    ) -> Result<CallToolResult, McpError> {
        pr_prompt::get_pr_ai_prompt("get_pr_ai_prompt", &self.settings, &self.git, params.0).await
    }

    #[tool(
        description = "Alias of get_pr_ai_prompt: returns a PR-description prompt built from the branch changes. No text is generated by this tool.",
        annotations(read_only_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    pub async fn generate_pr_description(
        &self,
        params: Parameters<GetPrPromptParams>,
    ) -> Result<CallToolResult, McpError> {
        pr_prompt::get_pr_ai_prompt("generate_pr_description", &self.settings, &self.git, params.0)
            .await
    }
}

#[tool_handler]
impl<G: GitOps + Send + Sync + 'static> ServerHandler for DevLensServer<G> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(format!(
            "devlens inspects the project at {}. Start with get_project_structure, \
             then search_files or find_components to locate code. Use get_git_diff and \
             get_pr_ai_prompt when preparing a pull request.",
            self.settings.root.path().display()
        ));
        info
    }
}
