//! devlens MCP server binary.
//!
//! Resolves the project root once, then serves the inspection tools over
//! the selected transport. Startup failures are reported through miette.

use clap::Parser;
use devlens::cli::{self, Cli, CliError};

#[tokio::main]
async fn main() -> miette::Result<()> {
    cli::init_tracing();

    let config = Cli::parse().into_config().map_err(CliError::from)?;
    cli::run(config).await?;

    Ok(())
}
