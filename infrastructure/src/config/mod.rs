//! Configuration file loading for symptom-triage
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SYMPTOM_TRIAGE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./triage.toml` or `./.triage.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/symptom-triage/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileClassifierKind, FileConfig, FileKnowledgeConfig, FileLimitsConfig,
    FilePredictionConfig, FileReplConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
