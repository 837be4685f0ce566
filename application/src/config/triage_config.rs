//! Triage runtime parameters.
//!
//! [`TriageConfig`] holds the static values the use cases and the cleanup
//! scheduler need: session lifetime, sweep interval, ranking size, and input
//! limits. It is built once at startup from the file configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use triage_domain::prediction::engine::{DEFAULT_PREVALENCE_BLEND, DEFAULT_TOP_K};

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 2000;
pub const DEFAULT_MAX_SYMPTOMS_CHARS: usize = 1000;

/// Runtime parameters for triage use cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Idle time after which a session is expired.
    pub session_ttl: Duration,
    /// How often the cleanup scheduler sweeps the store.
    pub cleanup_interval: Duration,
    /// Maximum number of predictions returned.
    pub top_k: usize,
    /// Weight of disease prevalence in the dataset score.
    pub prevalence_blend: f64,
    /// Character limit for chat messages.
    pub max_message_chars: usize,
    /// Character limit for stateless symptom text.
    pub max_symptoms_chars: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            session_ttl: DEFAULT_SESSION_TTL,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            top_k: DEFAULT_TOP_K,
            prevalence_blend: DEFAULT_PREVALENCE_BLEND,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
            max_symptoms_chars: DEFAULT_MAX_SYMPTOMS_CHARS,
        }
    }
}

impl TriageConfig {
    // ==================== Builder Methods ====================

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_prevalence_blend(mut self, alpha: f64) -> Self {
        self.prevalence_blend = alpha;
        self
    }

    pub fn with_max_message_chars(mut self, max: usize) -> Self {
        self.max_message_chars = max;
        self
    }

    pub fn with_max_symptoms_chars(mut self, max: usize) -> Self {
        self.max_symptoms_chars = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TriageConfig::default();
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
        assert_eq!(config.cleanup_interval, Duration::from_secs(300));
        assert_eq!(config.top_k, 5);
        assert!((config.prevalence_blend - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.max_message_chars, 2000);
        assert_eq!(config.max_symptoms_chars, 1000);
    }

    #[test]
    fn test_builder_chain() {
        let config = TriageConfig::default()
            .with_session_ttl(Duration::from_secs(60))
            .with_cleanup_interval(Duration::from_secs(10))
            .with_top_k(3)
            .with_max_message_chars(100);
        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert_eq!(config.cleanup_interval, Duration::from_secs(10));
        assert_eq!(config.top_k, 3);
        assert_eq!(config.max_message_chars, 100);
        assert_eq!(config.max_symptoms_chars, DEFAULT_MAX_SYMPTOMS_CHARS);
    }
}
