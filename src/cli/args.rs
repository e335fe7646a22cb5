//! CLI argument definitions using clap
//!
//! Commands:
//! - catq compile [--config <path>] [--server-version <X.Y.Z>]
//! - catq replay --responses <file> [--config <path>] [--mode <mode>] [--server-version <X.Y.Z>]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// catq - catalog query client
#[derive(Parser, Debug)]
#[command(name = "catq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a query document from stdin into a wire request
    Compile {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Server release to compile against, e.g. 4.2.11
        #[arg(long)]
        server_version: Option<String>,
    },

    /// Run a query document from stdin against recorded response pages
    Replay {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON array of recorded responses, in reply order
        #[arg(long)]
        responses: PathBuf,

        /// How rows are fetched
        #[arg(long, value_enum, default_value_t = ReplayMode::Results)]
        mode: ReplayMode,

        /// Server release the recorded session reports
        #[arg(long)]
        server_version: Option<String>,
    },
}

/// Fetch strategy for `replay`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayMode {
    /// Every row across all pages
    Results,
    /// The first page, closing any open cursor
    All,
    /// Exactly one row
    One,
    /// The first row, if any
    First,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
