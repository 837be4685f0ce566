//! Input limits from TOML (`[limits]` section)

use serde::{Deserialize, Serialize};

/// Raw input limit configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    /// Maximum characters in a chat message
    pub max_message_chars: usize,
    /// Maximum characters in stateless symptom text
    pub max_symptoms_chars: usize,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        Self {
            max_message_chars: 2000,
            max_symptoms_chars: 1000,
        }
    }
}
