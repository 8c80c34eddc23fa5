//! Server-side configuration.
//!
//! Loaded from a TOML file resolved from a context name
//! (`/etc/huddled/<name>.toml`) or a direct path.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for the HTTP server.
    pub listen: String,

    pub storage: StorageConfig,
    pub credentials: CredentialsConfig,
}

/// Storage section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding all persistent state.
    pub data_dir: String,
}

/// Credential store section — the external identity provider this
/// service asks to validate sessions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Base URL of the credential store's session API.
    pub base_url: String,

    /// Outbound request timeout in seconds. Bounds how long a request
    /// task may stay suspended on session resolution.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            storage: StorageConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api/auth".to_string(),
            timeout_secs: 5,
        }
    }
}

impl ServerConfig {
    /// Resolve a context name to `/etc/huddled/<name>.toml`; anything
    /// containing `/` or `.` is used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/huddled/{}.toml", name_or_path))
        }
    }

    /// Load configuration from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
