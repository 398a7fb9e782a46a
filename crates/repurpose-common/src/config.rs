//! Configuration loading for Repurpose.
//! Reads repurpose.toml from the current directory or the path in the
//! REPURPOSE_CONFIG env var. Every field has a default, so a missing file
//! yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{RepurposeError, Result};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "REPURPOSE_CONFIG";
/// Environment variable overriding `server.bind`.
pub const BIND_ENV: &str = "REPURPOSE_BIND";

const DEFAULT_CONFIG_FILE: &str = "repurpose.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub clinical: ClinicalConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

// ── Server ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:8000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

// ── Clinical trial source ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalConfig {
    /// ClinicalTrials.gov study-fields query endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Upper bound on a single trial query
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Result window requested from the source (rank 1..=max_results)
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Hosts allowed in addition to the built-in allowlist
    #[serde(default)]
    pub extra_allowed_hosts: Vec<String>,
}

fn default_api_url()      -> String { "https://clinicaltrials.gov/api/query/study_fields".to_string() }
fn default_timeout_secs() -> u64    { 10 }
fn default_max_results()  -> usize  { 50 }

impl ClinicalConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClinicalConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            extra_allowed_hosts: vec![],
        }
    }
}

// ── Report / PDF ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Hard cap on characters per PDF section body
    #[serde(default = "default_max_section_chars")]
    pub max_section_chars: usize,
}

fn default_max_section_chars() -> usize { 4000 }

impl Default for ReportConfig {
    fn default() -> Self {
        Self { max_section_chars: default_max_section_chars() }
    }
}

impl EngineConfig {
    /// Load configuration from repurpose.toml.
    /// Checks REPURPOSE_CONFIG first, then the current directory. A missing
    /// file is not an error; a present but invalid one is.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            tracing::info!(path = %path, "no config file found, using defaults");
            Self::default()
        };

        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.server.bind = bind;
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RepurposeError::Config(e.to_string()))
    }
}
