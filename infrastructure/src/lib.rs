//! Infrastructure layer for symptom-triage
//!
//! This crate contains adapters that implement the ports defined in the
//! application and domain layers: session storage and cleanup, knowledge
//! base loading, the naive Bayes classifier, and configuration file loading.

pub mod classifier;
pub mod config;
pub mod knowledge;
pub mod session;

// Re-export commonly used types
pub use classifier::NaiveBayesClassifier;
pub use config::{
    ConfigLoader, ConfigValidationError, FileClassifierKind, FileConfig, FileKnowledgeConfig,
    FileLimitsConfig, FilePredictionConfig, FileReplConfig, FileSessionConfig,
};
pub use knowledge::{BuiltinKnowledgeSource, FileKnowledgeSource, KnowledgeLoadError};
pub use session::{CleanupHandle, CleanupScheduler, InMemorySessionStore};
