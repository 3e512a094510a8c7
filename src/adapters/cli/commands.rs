//! CLI Command Definitions
//!
//! Argument parsing for the `statarb` replay binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// statarb - Volatility-band pairs trading replay
#[derive(Parser, Debug)]
#[command(
    name = "statarb",
    version = env!("CARGO_PKG_VERSION"),
    about = "Volatility-band pairs trading strategy",
    long_about = "statarb replays daily bars through a set of configured pairs, trading the \
                  hedge-ratio spread against a volatility band and sizing each leg by \
                  inverse volatility."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a bar feed through the configured pairs
    Run(RunCmd),

    /// Check a configuration file without running anything
    Validate(ValidateCmd),
}

/// Replay a bar feed
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/pairs.toml")]
    pub config: PathBuf,

    /// Override the feed path from the configuration
    #[arg(short, long, value_name = "FILE")]
    pub feed: Option<PathBuf>,

    /// Write indicator snapshots as JSON lines to this file
    #[arg(long, value_name = "FILE")]
    pub telemetry: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validate configuration
#[derive(Parser, Debug)]
pub struct ValidateCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/pairs.toml")]
    pub config: PathBuf,
}
