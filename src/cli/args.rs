//! CLI argument definitions using clap
//!
//! Commands:
//! - diarydb init --config <path>
//! - diarydb serve [--config <path>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// diarydb - diary entries over HTTP
#[derive(Parser, Debug)]
#[command(name = "diarydb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(global = true, short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file and prepare the store
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./diarydb.json")]
        config: PathBuf,
    },

    /// Start the HTTP API server
    Serve {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
