//! devlens - project inspection tools for AI agents over MCP.

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod git;
pub mod manifest;
pub mod mcp;

pub use config::{Config, ProjectRoot, Transport};
pub use error::{ToolError, ToolResult};
