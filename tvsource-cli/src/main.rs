//! TvSource CLI - Command-line interface
//!
//! Resolves media sources and opens live streams against a lineup file.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use tvsource_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "tvsource")]
#[command(about = "Live TV media source negotiation")]
struct Cli {
    /// Lineup file describing items, channels, and recordings
    #[arg(short, long, global = true)]
    lineup: Option<PathBuf>,

    /// Console log level
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn, global = true)]
    log_level: CliLogLevel,

    /// Directory for the full debug log
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let output = commands::handle_command(cli.command, cli.lineup.as_deref()).await?;
    println!("{output}");

    Ok(())
}
