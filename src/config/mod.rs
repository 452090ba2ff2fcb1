//! Runtime configuration.
//!
//! Values come from the command line (with environment fallbacks, see
//! [`crate::cli`]) and are resolved once at startup. The project root is
//! canonicalized here and handed to every tool explicitly; the process
//! working directory is never changed.

mod root;
#[cfg(test)]
mod root_test;

use std::net::IpAddr;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

pub use root::ProjectRoot;

/// Default git query timeout in seconds.
pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 60;
/// Default cap on diff text included in tool output.
pub const DEFAULT_MAX_DIFF_CHARS: usize = 50_000;

/// Startup configuration errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Project root does not exist: {0}")]
    #[diagnostic(
        code(devlens::config::root_not_found),
        help("Pass --root <DIR> or set DEVLENS_ROOT to an existing project directory")
    )]
    RootNotFound(String),

    #[error("Project root is not a directory: {0}")]
    #[diagnostic(code(devlens::config::root_not_a_directory))]
    RootNotADirectory(String),

    #[error("Failed to resolve project root {path}: {message}")]
    #[diagnostic(code(devlens::config::root_io))]
    Io { path: String, message: String },
}

/// How the MCP server talks to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP mounted at /mcp
    Http,
}

/// Settings every tool invocation reads. Immutable once built.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    pub root: ProjectRoot,
    pub git_timeout: Duration,
    pub max_diff_chars: usize,
}

impl ToolSettings {
    /// Settings with default limits for the given root.
    pub fn new(root: ProjectRoot) -> Self {
        Self {
            root,
            git_timeout: Duration::from_secs(DEFAULT_GIT_TIMEOUT_SECS),
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Transport to serve on
    pub transport: Transport,
    /// Host address to bind to (HTTP transport)
    pub host: IpAddr,
    /// Port to listen on (HTTP transport)
    pub port: u16,
    /// Values shared with the tools
    pub tools: ToolSettings,
}
