//! Sentiscope command-line shell

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::Commands;
use sentiscope_core::ShellConfig;
use sentiscope_core::tracing::{InstrumentationConfig, init_tracing};
use sentiscope_frontend::Shell;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "sentiscope")]
#[command(about = "Client shell for the Sentiscope comment analysis backend")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ShellConfig::load_from_file(path)?,
        None => ShellConfig::load()?,
    };

    init_tracing(&InstrumentationConfig::for_service(
        "sentiscope",
        config.log_level.clone(),
    ))?;
    if let Some(path) = &cli.config {
        info!("Loaded configuration from: {}", path.display());
    }

    let shell = Shell::from_config(config)?;
    if let Err(e) = cli.command.execute(&shell).await {
        error!("Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
