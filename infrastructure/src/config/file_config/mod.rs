//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! after validation.

mod knowledge;
mod limits;
mod prediction;
mod repl;
mod session;

pub use knowledge::FileKnowledgeConfig;
pub use limits::FileLimitsConfig;
pub use prediction::{FileClassifierKind, FilePredictionConfig};
pub use repl::FileReplConfig;
pub use session::FileSessionConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use triage_application::TriageConfig;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("session.ttl_minutes cannot be 0")]
    InvalidTtl,

    #[error("session.cleanup_interval_minutes cannot be 0")]
    InvalidCleanupInterval,

    #[error("prediction.top_k cannot be 0")]
    InvalidTopK,

    #[error("prediction.prevalence_blend must be within [0, 1], got {0}")]
    InvalidPrevalenceBlend(f64),

    #[error("limits.{0} cannot be 0")]
    InvalidLimit(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session lifecycle settings
    pub session: FileSessionConfig,
    /// Ranking settings
    pub prediction: FilePredictionConfig,
    /// Input limits
    pub limits: FileLimitsConfig,
    /// Knowledge base location
    pub knowledge: FileKnowledgeConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.session.ttl_minutes == 0 {
            return Err(ConfigValidationError::InvalidTtl);
        }
        if self.session.cleanup_interval_minutes == 0 {
            return Err(ConfigValidationError::InvalidCleanupInterval);
        }
        if self.prediction.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK);
        }
        let blend = self.prediction.prevalence_blend;
        if !(0.0..=1.0).contains(&blend) {
            return Err(ConfigValidationError::InvalidPrevalenceBlend(blend));
        }
        if self.limits.max_message_chars == 0 {
            return Err(ConfigValidationError::InvalidLimit("max_message_chars"));
        }
        if self.limits.max_symptoms_chars == 0 {
            return Err(ConfigValidationError::InvalidLimit("max_symptoms_chars"));
        }
        Ok(())
    }

    /// Validate and convert into the application configuration
    pub fn to_triage_config(&self) -> Result<TriageConfig, ConfigValidationError> {
        self.validate()?;
        Ok(TriageConfig::default()
            .with_session_ttl(minutes(self.session.ttl_minutes))
            .with_cleanup_interval(minutes(self.session.cleanup_interval_minutes))
            .with_top_k(self.prediction.top_k)
            .with_prevalence_blend(self.prediction.prevalence_blend)
            .with_max_message_chars(self.limits.max_message_chars)
            .with_max_symptoms_chars(self.limits.max_symptoms_chars))
    }
}

fn minutes(m: u64) -> Duration {
    Duration::from_secs(m.saturating_mul(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[session]
ttl_minutes = 10
cleanup_interval_minutes = 1

[prediction]
top_k = 3
prevalence_blend = 0.5
classifier = "naive_bayes"
enable_heuristic = false

[limits]
max_message_chars = 500

[knowledge]
path = "data/diseases.toml"

[repl]
show_symptoms = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.ttl_minutes, 10);
        assert_eq!(config.prediction.classifier, FileClassifierKind::NaiveBayes);
        assert!(!config.prediction.enable_heuristic);
        assert_eq!(config.limits.max_message_chars, 500);
        // Unset fields keep their defaults
        assert_eq!(config.limits.max_symptoms_chars, 1000);
        assert_eq!(
            config.knowledge.path.as_deref(),
            Some(std::path::Path::new("data/diseases.toml"))
        );
        assert!(!config.repl.show_symptoms);
        assert!(config.repl.color);
    }

    #[test]
    fn test_default_converts_to_default_triage_config() {
        let config = FileConfig::default().to_triage_config().unwrap();
        assert_eq!(config, TriageConfig::default());
    }

    #[test]
    fn test_validate_zero_ttl() {
        let config: FileConfig = toml::from_str("[session]\nttl_minutes = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTtl));
    }

    #[test]
    fn test_validate_zero_interval_and_top_k() {
        let config: FileConfig =
            toml::from_str("[session]\ncleanup_interval_minutes = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidCleanupInterval)
        );

        let config: FileConfig = toml::from_str("[prediction]\ntop_k = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTopK));
    }

    #[test]
    fn test_validate_blend_range() {
        let config: FileConfig =
            toml::from_str("[prediction]\nprevalence_blend = 1.5\n").unwrap();
        assert!(matches!(
            config.to_triage_config(),
            Err(ConfigValidationError::InvalidPrevalenceBlend(_))
        ));
    }

    #[test]
    fn test_validate_zero_limit() {
        let config: FileConfig = toml::from_str("[limits]\nmax_symptoms_chars = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidLimit("max_symptoms_chars"))
        );
    }
}
