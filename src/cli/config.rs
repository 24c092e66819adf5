//! Service configuration file
//!
//! A JSON object; every key is optional:
//!
//! ```json
//! {
//!   "host": "0.0.0.0",
//!   "port": 19000,
//!   "cors_origins": [],
//!   "data_file": "./data/records.json",
//!   "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::store::{FileRecordStore, MemoryRecordStore, RecordStore};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// JSON snapshot path; memory-only when absent
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Default log filter (overridden by `RECORDTRAIL_LOG`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            data_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected one of {:?}",
                self.log_level, LOG_LEVELS
            )));
        }

        Ok(())
    }

    /// Open the configured record store
    pub fn open_store(&self) -> CliResult<Arc<dyn RecordStore>> {
        match &self.data_file {
            Some(path) => Ok(Arc::new(FileRecordStore::open(path)?)),
            None => Ok(Arc::new(MemoryRecordStore::new())),
        }
    }
}
