//! Client configuration file
//!
//! ```json
//! {
//!   "default_page_size": 500,
//!   "server_version": "4.3.0",
//!   "log_level": "warn"
//! }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event, set_min_severity, Event, Severity};
use crate::wire::{ServerVersion, DEFAULT_MAX_ROWS};

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Page size for documents without a `limit` (default 500)
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Server release used when none is given on the command line
    #[serde(default = "default_server_version")]
    pub server_version: String,

    /// Minimum log severity: trace, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_page_size() -> u32 {
    DEFAULT_MAX_ROWS as u32
}
fn default_server_version() -> String {
    "4.3.0".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            server_version: default_server_version(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: ClientConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        log_event(
            Event::ConfigLoaded,
            &[("path", path.display().to_string().as_str())],
        );
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.default_page_size == 0 {
            return Err(CliError::config_error("default_page_size must be > 0"));
        }

        self.parsed_server_version()?;
        self.severity()?;

        Ok(())
    }

    /// `server_version` as a parsed release
    pub fn parsed_server_version(&self) -> CliResult<ServerVersion> {
        ServerVersion::parse(&self.server_version).map_err(|e| {
            CliError::config_error(format!("Invalid server_version: {}", e.message()))
        })
    }

    /// `log_level` as a severity
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }

    /// Install `log_level` as the global minimum severity
    pub fn apply_logging(&self) -> CliResult<()> {
        set_min_severity(self.severity()?);
        Ok(())
    }
}
