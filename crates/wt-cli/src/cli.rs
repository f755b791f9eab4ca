//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Personal work-hours logger.
///
/// Records how long you worked each day and reports your average and your
/// cumulative overtime against a daily quota.
#[derive(Debug, Parser)]
#[command(name = "wt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log worktime for today.
    Add {
        /// Worktime in HhM format (e.g., 2h30).
        #[arg(conflicts_with = "uptime")]
        time: Option<String>,

        /// Log the time elapsed since the system booted.
        #[arg(short, long)]
        uptime: bool,
    },

    /// Show the worktime summary.
    Show {
        /// List every logged day before the summary.
        #[arg(short, long)]
        full: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
