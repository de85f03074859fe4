use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IdeasError, Result};
use crate::http::DEFAULT_ENDPOINT;

/// Contents of `~/.ideasjar/config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeasConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the ideas API
    pub endpoint: Option<String>,
    /// Skip TLS certificate verification
    pub insecure: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter when RUST_LOG is unset (e.g. "info", "ideasjar_core=debug")
    pub level: Option<String>,
}

impl IdeasConfig {
    /// Load from [`config_path`](Self::config_path). A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| IdeasError::io(path, e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| IdeasError::config(format!("invalid TOML: {}", e)))
    }

    /// Config file path: `$IDEASJAR_CONFIG`, else `~/.ideasjar/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("IDEASJAR_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ideasjar/config.toml")
    }

    /// Endpoint priority: explicit (flag/env) > config file > public deployment
    pub fn resolve_endpoint(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.api.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn insecure(&self) -> bool {
        self.api.insecure.unwrap_or(false)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| IdeasError::config(format!("failed to serialize config: {}", e)))
    }

    /// Starter file written by `ideasjar config init`
    pub fn template() -> String {
        format!(
            "[api]\n\
             # Base URL of the ideas API\n\
             endpoint = \"{}\"\n\
             # Accept invalid TLS certificates\n\
             insecure = false\n\
             \n\
             [log]\n\
             # Used when RUST_LOG is not set\n\
             level = \"info\"\n",
            DEFAULT_ENDPOINT
        )
    }
}
