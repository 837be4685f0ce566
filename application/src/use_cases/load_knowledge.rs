//! Load Knowledge use case.
//!
//! Obtains the disease knowledge base once at startup through a
//! [`KnowledgeSourcePort`]. The result is shared read-only for the rest of
//! the process lifetime.

use crate::ports::knowledge_source::{KnowledgeSourceError, KnowledgeSourcePort};
use std::sync::Arc;
use tracing::{info, warn};
use triage_domain::DiseaseKnowledge;

/// Use case for loading the knowledge base.
pub struct LoadKnowledgeUseCase {
    source: Arc<dyn KnowledgeSourcePort>,
}

impl LoadKnowledgeUseCase {
    pub fn new(source: Arc<dyn KnowledgeSourcePort>) -> Self {
        Self { source }
    }

    /// Load the knowledge base.
    ///
    /// An empty knowledge base is returned with a warning; prediction
    /// requests against it fail with `PredictionUnavailable`.
    pub async fn execute(&self) -> Result<Arc<DiseaseKnowledge>, KnowledgeSourceError> {
        let origin = self.source.describe();
        let knowledge = self.source.load().await?;

        if knowledge.is_empty() {
            warn!("Knowledge base from {} contains no diseases", origin);
        } else {
            info!(
                "Loaded {} diseases ({} emergency symptoms) from {}",
                knowledge.len(),
                knowledge.emergency_symptoms().len(),
                origin
            );
        }

        Ok(Arc::new(knowledge))
    }
}
