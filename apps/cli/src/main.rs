//! climatemap CLI — build and query the climate robotics catalog.
//!
//! Pulls the public spreadsheet export (or a local CSV copy), normalizes it
//! into geocoded entries, and prints them filtered or as facet lists.

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
