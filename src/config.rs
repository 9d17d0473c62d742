use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};

/// Environment variable naming the config file when none is passed explicitly
pub const CONFIG_ENV: &str = "A3S_TRIAGE_CONFIG";

/// User-configurable settings for the triage server and CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Host address for the HTTP server (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the HTTP server (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the JSON model artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Report display names ("Technical Support") instead of raw labels
    #[serde(default)]
    pub remap_labels: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_model_path() -> PathBuf {
    PathBuf::from("classifier_model.json")
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model_path: default_model_path(),
            remap_labels: false,
        }
    }
}

impl TriageConfig {
    /// Load configuration from `path`, or from `$A3S_TRIAGE_CONFIG`.
    /// Returns default config if neither names an existing file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        };

        match path {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TriageError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: TriageConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Returns the server bind address string (e.g., "127.0.0.1:8000").
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
