//! Tool-level error types.
//!
//! Every handler works with [`ToolError`] internally. At the MCP boundary the
//! error is rendered as text inside a successful tool result, so the host
//! always receives a readable explanation instead of a protocol fault.

use miette::Diagnostic;
use thiserror::Error;

use crate::fs::FsError;
use crate::git::GitError;

/// Errors a tool invocation can produce while executing.
#[derive(Error, Diagnostic, Debug)]
pub enum ToolError {
    #[error("Not found: {0}")]
    #[diagnostic(code(devlens::tool::not_found))]
    NotFound(String),

    #[error("Access denied: {0}")]
    #[diagnostic(code(devlens::tool::access))]
    Access(String),

    #[error("Parse error in {path}: {message}")]
    #[diagnostic(code(devlens::tool::parse))]
    Parse { path: String, message: String },

    #[error("Git command failed: {0}")]
    #[diagnostic(code(devlens::tool::external_command))]
    ExternalCommand(#[from] GitError),

    #[error("Invalid input: {0}")]
    #[diagnostic(code(devlens::tool::invalid_input))]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(devlens::tool::io))]
    Io(String),

    #[error("Background task failed: {0}")]
    #[diagnostic(code(devlens::tool::task))]
    Task(String),
}

impl From<FsError> for ToolError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound { .. } | FsError::NotADirectory { .. } => {
                ToolError::NotFound(err.to_string())
            }
            FsError::PermissionDenied { .. } => ToolError::Access(err.to_string()),
            FsError::OutsideRoot { .. } | FsError::InvalidPattern { .. } => {
                ToolError::InvalidInput(err.to_string())
            }
            FsError::Io { .. } => ToolError::Io(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ToolError {
    fn from(err: tokio::task::JoinError) -> Self {
        ToolError::Task(err.to_string())
    }
}

/// Result type for tool execution.
pub type ToolResult<T> = Result<T, ToolError>;
