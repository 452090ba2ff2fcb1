//! Streamable HTTP hosting for the inspection tools.
//!
//! The stdio transport serves one `DevLensServer` directly; over HTTP every
//! MCP session gets its own server instance sharing the same settings.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::config::ToolSettings;
use crate::git::RealGit;

use super::server::DevLensServer;

/// Build the HTTP service to mount under an axum router.
///
/// Sessions are tracked in memory and end when `cancellation_token` fires.
///
/// ```no_run
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use devlens::config::ToolSettings;
/// # use devlens::mcp::create_mcp_service;
/// # use devlens::ProjectRoot;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ToolSettings::new(ProjectRoot::resolve(".")?);
/// let app: Router = Router::new()
///     .nest_service("/mcp", create_mcp_service(settings, CancellationToken::new()));
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service(
    settings: ToolSettings,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<DevLensServer<RealGit>, LocalSessionManager> {
    let settings = Arc::new(settings);

    // rmcp expects the factory to fail with io::Error
    let per_session = move || -> Result<DevLensServer<RealGit>, std::io::Error> {
        Ok(DevLensServer::new(ToolSettings::clone(&settings)))
    };

    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(per_session, LocalSessionManager::default().into(), config)
}
