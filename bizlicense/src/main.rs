// bizlicense/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug bizlicense match ... to see the details. Logs go to
    // stderr so stdout stays clean for JSON and markdown output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: MATCH ---
        Commands::Match {
            project,
            profile,
            format,
        } => commands::matching::execute(project, profile, format)?,

        // --- USE CASE: REPORT ---
        Commands::Report {
            project,
            profile,
            format,
            output,
            provider,
        } => commands::report::execute(project, profile, format, output, provider).await?,

        // --- USE CASE: CATALOG SUMMARY ---
        Commands::Catalog { project, format } => commands::catalog::execute(project, format)?,
    }

    Ok(())
}
