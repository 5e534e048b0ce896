//! CLI definitions for placereview.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// placereview CLI.
#[derive(Parser)]
#[command(name = "placereview")]
#[command(about = "Collect visitor reviews for a map-service restaurant listing")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/placereview.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Crawl one target and publish the result
    Run {
        /// Target identifier (defaults to target.id or PLACE_ID)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Handle an invocation event and print the completion payload
    Invoke {
        /// Event JSON, or `-` to read it from stdin
        #[arg(short, long, default_value = "{}")]
        event: String,
    },
}
