use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the server binary.
#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind HTTP listener: {0}")]
    #[diagnostic(code(devlens::cli::io))]
    Io(#[from] std::io::Error),

    #[error("MCP transport error: {0}")]
    #[diagnostic(code(devlens::cli::transport))]
    Transport(String),
}
