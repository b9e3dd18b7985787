//! SiteScout CLI, an organization list enrichment tool.
//!
//! Takes a CSV of organization names, finds official websites through a
//! search provider, flags near-duplicate rows, verifies every URL, and
//! writes an annotated copy of the table.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
