//! CLI module for diarydb
//!
//! Provides command-line interface for:
//! - init: Write a starter config and prepare the store
//! - serve: Run the HTTP API

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use config::{Config, StoreConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
