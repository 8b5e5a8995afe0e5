//! Configuration file structure
//!
//! ```json
//! {
//!   "http": { "host": "0.0.0.0", "port": 8080, "cors_origins": [] },
//!   "store": { "kind": "sqlite", "path": "./diary.db" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::diary::{DiaryRepository, InMemoryDiaryRepository, SqliteDiaryRepository};
use crate::http_server::HttpServerConfig;

/// Which store backs the repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process-local, lost on exit
    #[default]
    Memory,
    /// SQLite database file
    Sqlite { path: PathBuf },
}

impl StoreConfig {
    /// Open the configured repository
    pub fn open(&self) -> CliResult<Arc<dyn DiaryRepository>> {
        let repository: Arc<dyn DiaryRepository> = match self {
            StoreConfig::Memory => Arc::new(InMemoryDiaryRepository::new()),
            StoreConfig::Sqlite { path } => Arc::new(SqliteDiaryRepository::open(path)?),
        };
        Ok(repository)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Config written by `init`: default HTTP settings over a SQLite file
    pub fn starter(store_path: impl Into<PathBuf>) -> Self {
        Self {
            http: HttpServerConfig::default(),
            store: StoreConfig::Sqlite {
                path: store_path.into(),
            },
        }
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        if let StoreConfig::Sqlite { path } = &self.store {
            if path.as_os_str().is_empty() {
                return Err(CliError::config_error("store.path must not be empty"));
            }
        }

        Ok(())
    }
}
