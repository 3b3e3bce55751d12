//! Storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the RocksDB-backed store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory for RocksDB
    pub data_dir: PathBuf,

    /// Write buffer size (MB)
    pub write_buffer_size_mb: usize,

    /// Max background jobs (compaction + flush)
    pub max_background_jobs: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/cashdesk"),
            write_buffer_size_mb: 64,
            max_background_jobs: 2,
        }
    }
}
