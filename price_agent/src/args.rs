//! Command-line arguments for the local host.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Single command to run, e.g. "/price BTC". Without it commands are read from stdin.
    #[clap(long, short)]
    pub command: Option<String>,

    /// Print the raw quote as JSON instead of the formatted overview.
    #[clap(long, conflicts_with = "kv")]
    pub json: bool,

    /// Print the quote in the delimited `key:value;key:value` form.
    #[clap(long)]
    pub kv: bool,
}
