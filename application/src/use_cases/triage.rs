//! Triage pipeline.
//!
//! The pure part of handling a message: normalize the text, detect
//! emergencies, rank diseases, and render the reply. Both the session path
//! and the stateless path go through [`TriagePipeline::assess`], so identical
//! input yields identical predictions on either path.

use tracing::debug;
use triage_domain::{
    DomainError, EmergencyDetector, Prediction, PredictionEngine, ReplyTemplate,
    SymptomNormalizer, SymptomSet,
};

/// Outcome of assessing one piece of free text
#[derive(Debug, Clone, PartialEq)]
pub struct TriageAssessment {
    pub symptoms: SymptomSet,
    pub predictions: Vec<Prediction>,
    pub is_emergency: bool,
    pub reply: String,
}

/// Normalizer, detector, and engine over one shared knowledge base
#[derive(Debug, Clone)]
pub struct TriagePipeline {
    normalizer: SymptomNormalizer,
    detector: EmergencyDetector,
    engine: PredictionEngine,
}

impl TriagePipeline {
    pub fn new(engine: PredictionEngine) -> Self {
        let knowledge = engine.knowledge().clone();
        Self {
            normalizer: SymptomNormalizer::for_knowledge(&knowledge),
            detector: EmergencyDetector::new(knowledge),
            engine,
        }
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    /// Assess free text.
    ///
    /// Fails only with [`DomainError::PredictionUnavailable`] when the
    /// knowledge base cannot serve a prediction.
    pub fn assess(&self, text: &str) -> Result<TriageAssessment, DomainError> {
        let symptoms = self.normalizer.normalize(text);
        let is_emergency = self.detector.detect(text, &symptoms);
        let predictions = self.engine.predict(&symptoms)?;

        let serious = predictions
            .first()
            .and_then(|top| self.engine.knowledge().get(&top.disease))
            .is_some_and(|disease| disease.emergency);
        let reply = ReplyTemplate::compose(is_emergency, &predictions, &symptoms, serious);

        debug!(
            "Assessed {} known / {} unknown symptoms: {} predictions, emergency={}",
            symptoms.known().len(),
            symptoms.unknown().len(),
            predictions.len(),
            is_emergency
        );

        Ok(TriageAssessment {
            symptoms,
            predictions,
            is_emergency,
            reply,
        })
    }
}
