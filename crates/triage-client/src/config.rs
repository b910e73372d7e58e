//! TOML client configuration.
//!
//! ```toml
//! api_base = "http://localhost:8000"
//! request_timeout_secs = 30
//! data_dir = "/var/lib/triage-desk"
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use triage_contracts::error::{DeskError, DeskResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the triage service, without the `/api/triage` path.
    pub api_base: String,
    pub request_timeout_secs: u64,
    /// Directory holding the persisted language and history files.
    pub data_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: default_data_dir(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::ConfigError` if the TOML is malformed, carries
    /// unknown keys, or fails validation.
    pub fn from_toml_str(s: &str) -> DeskResult<Self> {
        let config: ClientConfig = toml::from_str(s).map_err(|e| DeskError::ConfigError {
            reason: format!("failed to parse client config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> DeskResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DeskError::ConfigError {
            reason: format!("failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> DeskResult<()> {
        let base = self.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(DeskError::ConfigError {
                reason: format!("api_base must be an http(s) URL, got {:?}", self.api_base),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(DeskError::ConfigError {
                reason: "request_timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Full URL of the triage endpoint.
    pub fn triage_url(&self) -> String {
        format!("{}/api/triage", self.api_base.trim().trim_end_matches('/'))
    }
}

/// `<platform data dir>/triage-desk`, or `./triage-desk` when the platform
/// has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("triage-desk")
}
