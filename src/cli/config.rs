//! Configuration file
//!
//! ```json
//! {
//!   "log_path": "./errors.jsonl",
//!   "application_name": "shop",
//!   "base_url": "http://localhost:5180/",
//!   "http": { "port": 5180 },
//!   "digest": { "page_size": 30, "max_pages": 30, "max_items": 30 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::{CliError, CliResult};
use crate::digest::DigestLimits;
use crate::error_log::FileErrorLog;
use crate::feed::{default_machine_name, DetailLinkResolver, FeedSettings};
use crate::http_server::HttpServerConfig;
use crate::observability::Severity;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON-lines error log file (required)
    pub log_path: String,

    /// Application named in the feed title (required)
    pub application_name: String,

    /// Machine named in the feed title (default: $HOSTNAME or "localhost")
    #[serde(default)]
    pub machine_name: Option<String>,

    /// Public base URL of the server; channel and detail links hang off it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Minimum log severity: trace, info, warn, error (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub digest: DigestLimits,
}

fn default_base_url() -> String {
    "http://localhost:5180/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.log_path.trim().is_empty() {
            return Err(CliError::config_error("log_path must not be empty"));
        }

        if self.application_name.trim().is_empty() {
            return Err(CliError::config_error("application_name must not be empty"));
        }

        self.digest
            .validate()
            .map_err(|e| CliError::config_error(e.to_string()))?;

        self.link_resolver()?;
        self.severity()?;

        Ok(())
    }

    /// Parsed `base_url`
    pub fn base_url(&self) -> CliResult<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| CliError::config_error(format!("Invalid base_url '{}': {}", self.base_url, e)))
    }

    pub fn link_resolver(&self) -> CliResult<DetailLinkResolver> {
        DetailLinkResolver::new(self.base_url()?).map_err(|e| CliError::config_error(e.to_string()))
    }

    pub fn feed_settings(&self) -> CliResult<FeedSettings> {
        let machine_name = self.machine_name.clone().unwrap_or_else(default_machine_name);
        Ok(FeedSettings::new(self.base_url()?)
            .with_machine_name(machine_name)
            .with_limits(self.digest))
    }

    pub fn severity(&self) -> CliResult<Severity> {
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn or error.",
                other
            ))),
        }
    }

    pub fn open_log(&self) -> FileErrorLog {
        FileErrorLog::open(self.application_name.clone(), &self.log_path)
    }
}
