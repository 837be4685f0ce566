//! Knowledge source port
//!
//! Defines how the application layer obtains the disease knowledge base.

use async_trait::async_trait;
use thiserror::Error;
use triage_domain::{DiseaseKnowledge, DomainError};

/// Errors raised while obtaining a knowledge base
#[derive(Error, Debug)]
pub enum KnowledgeSourceError {
    #[error("Knowledge source unreadable: {0}")]
    Unreadable(String),

    #[error("Knowledge source malformed: {0}")]
    Malformed(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Port for loading the disease knowledge base
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait KnowledgeSourcePort: Send + Sync {
    /// Human-readable origin of the data (a path, or "builtin")
    fn describe(&self) -> String;

    /// Load and validate the knowledge base
    async fn load(&self) -> Result<DiseaseKnowledge, KnowledgeSourceError>;
}
