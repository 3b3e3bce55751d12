//! Service configuration
//!
//! Loaded from a TOML file when `DESK_CONFIG` points at one, otherwise
//! from individual environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// REST service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listen address
    pub listen_addr: String,

    /// Data directory for the RocksDB store
    pub data_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            data_dir: PathBuf::from("./data/cashdesk"),
        }
    }
}

impl ServiceConfig {
    /// Load from `DESK_CONFIG` if set, else from environment variables
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("DESK_CONFIG") {
            tracing::info!("Loading config from: {}", path);
            Self::from_file(&path)
        } else {
            tracing::info!("Loading config from environment variables");
            Ok(Self::from_env())
        }
    }

    /// Load from a TOML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Build from environment variables over the defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("DESK_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Ok(dir) = std::env::var("DESK_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }
}
