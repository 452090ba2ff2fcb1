//! Model Context Protocol (MCP) server implementation
//!
//! - **server**: the tool router and `ServerHandler` implementation
//! - **service**: Streamable HTTP service for hosting behind Axum
//! - **tools**: parameter types and logic for each tool
//!
//! The stdio transport needs no glue beyond `DevLensServer::serve(stdio())`.

pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod service_test;

pub use server::DevLensServer;
pub use service::create_mcp_service;
