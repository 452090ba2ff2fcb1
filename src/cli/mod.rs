//! Command line entry point for the `devlens-mcp` binary.
//!
//! Parses flags (with environment fallbacks), sets up logging and serves the
//! MCP tools over stdio or streamable HTTP.

pub mod error;


use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{
    Config, ConfigError, DEFAULT_GIT_TIMEOUT_SECS, DEFAULT_MAX_DIFF_CHARS, ProjectRoot,
    ToolSettings, Transport,
};
use crate::mcp::{DevLensServer, create_mcp_service};

pub use error::CliError;

#[derive(Parser, Debug)]
#[command(name = "devlens-mcp")]
#[command(author, version, about = "Project inspection tools for AI agents over MCP", long_about = None)]
pub struct Cli {
    /// Project directory every tool is scoped to
    #[arg(long, env = "DEVLENS_ROOT")]
    pub root: PathBuf,

    /// Transport to serve the MCP protocol on
    #[arg(long, env = "DEVLENS_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Host address to bind to (http transport)
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on (http transport)
    #[arg(short, long, default_value = "3737")]
    pub port: u16,

    /// Seconds a single git query may run before the tool gives up
    #[arg(
        long,
        env = "DEVLENS_GIT_TIMEOUT_SECS",
        default_value_t = DEFAULT_GIT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub git_timeout_secs: u64,

    /// Maximum characters of diff text included in tool output
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DIFF_CHARS as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_diff_chars: u64,
}

impl Cli {
    /// Resolve the project root and build the runtime configuration.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let root = ProjectRoot::resolve(&self.root)?;

        let mut tools = ToolSettings::new(root);
        tools.git_timeout = Duration::from_secs(self.git_timeout_secs);
        tools.max_diff_chars = usize::try_from(self.max_diff_chars).unwrap_or(usize::MAX);

        Ok(Config {
            transport: self.transport,
            host: self.host,
            port: self.port,
            tools,
        })
    }
}

/// Log to stderr; stdout carries JSON-RPC in stdio mode.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devlens=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Axum router with the MCP service mounted at `/mcp`.
pub fn router(settings: ToolSettings, cancellation_token: CancellationToken) -> Router {
    Router::new()
        .nest_service("/mcp", create_mcp_service(settings, cancellation_token))
        .layer(TraceLayer::new_for_http())
}

/// Serve until the host disconnects (stdio) or the process is interrupted (http).
pub async fn run(config: Config) -> Result<(), CliError> {
    info!(
        "Inspecting project at {} over {:?}",
        config.tools.root.path().display(),
        config.transport
    );

    match config.transport {
        Transport::Stdio => serve_stdio(config.tools).await,
        Transport::Http => serve_http(config).await,
    }
}

async fn serve_stdio(settings: ToolSettings) -> Result<(), CliError> {
    let service = DevLensServer::new(settings)
        .serve(stdio())
        .await
        .map_err(|e| CliError::Transport(e.to_string()))?;

    let quit_reason = service
        .waiting()
        .await
        .map_err(|e| CliError::Transport(e.to_string()))?;
    info!("Server stopped: {:?}", quit_reason);

    Ok(())
}

async fn serve_http(config: Config) -> Result<(), CliError> {
    let ct = CancellationToken::new();
    let app = router(config.tools, ct.clone());

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
            ct.cancel();
        })
        .await?;

    Ok(())
}
