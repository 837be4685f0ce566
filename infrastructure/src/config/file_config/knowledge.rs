//! Knowledge base location from TOML (`[knowledge]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw knowledge base configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKnowledgeConfig {
    /// TOML or JSON dataset; the built-in knowledge base is used when unset
    pub path: Option<PathBuf>,
}
