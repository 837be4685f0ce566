//! Presentation-level configuration
//!
//! Configuration for console output and REPL behavior.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct ReplConfig {
    /// Print the recognized and unrecognized symptoms after each reply
    pub show_symptoms: bool,
    /// Enable colored terminal output
    pub color: bool,
    /// Path to history file; the platform data directory when unset
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_symptoms: true,
            color: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// History file to use, if any location is available
    pub fn resolved_history_file(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("symptom-triage").join("history.txt")))
    }
}
