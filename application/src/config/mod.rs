//! Application-level configuration.
//!
//! - [`TriageConfig`] - session lifetime, sweep interval, ranking size, input limits

pub mod triage_config;

pub use triage_config::TriageConfig;
