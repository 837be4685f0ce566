//! Session configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};

/// Raw session lifecycle configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Idle minutes before a session expires
    pub ttl_minutes: u64,
    /// Minutes between cleanup sweeps
    pub cleanup_interval_minutes: u64,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: 30,
            cleanup_interval_minutes: 5,
        }
    }
}
