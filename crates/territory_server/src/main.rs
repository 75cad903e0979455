//! Territory - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::io::Write;
use territory_server::{ServerConfig, SessionManager, play};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play { name_a, name_b } => run_play(&config, name_a, name_b).await,
        Command::Rules => print_rules(&config),
    }
}

/// Run a hot-seat match on stdin/stdout
async fn run_play(config: &ServerConfig, name_a: String, name_b: String) -> Result<()> {
    info!(rules = ?config.rules(), "Starting hot-seat match");
    let manager = SessionManager::from_config(config)?;
    let input = BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    play::run_hotseat(&manager, name_a, name_b, input, &mut output).await?;
    output.flush()?;
    Ok(())
}

/// Print the effective configuration
fn print_rules(config: &ServerConfig) -> Result<()> {
    let mut output = std::io::stdout();
    write!(output, "{}", config.to_toml()?)?;
    Ok(())
}
