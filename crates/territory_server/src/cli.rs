//! Command-line interface for the territory binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Territory - two-player territory capture on a 9×9 board
#[derive(Parser, Debug)]
#[command(name = "territory")]
#[command(about = "Two-player territory capture game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a local hot-seat match on the terminal
    Play {
        /// Name of the first player (moves first)
        #[arg(long, default_value = "Player A")]
        name_a: String,

        /// Name of the second player
        #[arg(long, default_value = "Player B")]
        name_b: String,
    },

    /// Print the effective configuration as TOML
    Rules,
}
