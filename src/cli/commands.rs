//! CLI command implementations
//!
//! `init` writes a starter configuration and prepares the store.
//! `serve` opens the configured store and runs the HTTP server until it exits.

use std::fs;
use std::path::Path;

use tracing::info;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::diary::DiaryService;
use crate::http_server::HttpServer;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Write a starter config file and create the store schema
///
/// Refuses to overwrite an existing config file.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path.display()));
    }

    // The database file lives next to the config file
    let store_path = config_path
        .parent()
        .map(|dir| dir.join("diary.db"))
        .unwrap_or_else(|| "diary.db".into());
    let config = Config::starter(store_path);
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(config_path, json)?;

    // Opening the store creates its schema
    config.store.open()?;

    info!(config = %config_path.display(), "initialized diarydb");
    Ok(())
}

/// Start the HTTP server with the given (or default) configuration
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(port) = port {
        config.http.port = port;
        config.validate()?;
    }

    let repository = config.store.open()?;
    info!(store = ?config.store, "opened diary store");

    let server = HttpServer::with_config(config.http, DiaryService::new(repository));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
