//! Prediction engine: symptom set to ranked disease list.
//!
//! # Dataset score
//!
//! For every disease `D` sharing at least one symptom with the input `S`:
//!
//! ```text
//! recall     = |S ∩ D| / |D|
//! confidence = recall × ((1 − α) + α × prevalence(D))
//! ```
//!
//! `α` is the prevalence blend in `[0, 1]`. The score grows with overlap,
//! ignores input tokens that `D` does not mention, and stays within `[0, 1]`.
//!
//! Candidates from any [`SecondaryPredictor`] are merged with the dataset
//! scores through [`reconcile`].

use super::entities::Prediction;
use super::reconcile::reconcile;
use super::source::SecondaryPredictor;
use crate::core::error::DomainError;
use crate::knowledge::{DiseaseEntry, DiseaseKnowledge};
use crate::symptom::set::SymptomSet;
use std::sync::Arc;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_PREVALENCE_BLEND: f64 = 0.2;

/// Blend an overlap ratio with a disease's prevalence
pub fn blend_confidence(recall: f64, prevalence: f64, alpha: f64) -> f64 {
    (recall * ((1.0 - alpha) + alpha * prevalence)).clamp(0.0, 1.0)
}

/// Number of the disease's symptoms present among the known tokens
pub fn overlap(symptoms: &SymptomSet, disease: &DiseaseEntry) -> usize {
    disease
        .symptoms
        .iter()
        .filter(|s| symptoms.contains(s))
        .count()
}

/// Ranks diseases for a [`SymptomSet`] against a shared knowledge base.
#[derive(Clone)]
pub struct PredictionEngine {
    knowledge: Arc<DiseaseKnowledge>,
    secondary: Vec<Arc<dyn SecondaryPredictor>>,
    top_k: usize,
    prevalence_blend: f64,
}

impl PredictionEngine {
    pub fn new(knowledge: Arc<DiseaseKnowledge>) -> Self {
        Self {
            knowledge,
            secondary: Vec::new(),
            top_k: DEFAULT_TOP_K,
            prevalence_blend: DEFAULT_PREVALENCE_BLEND,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set `α`; values outside `[0, 1]` are clamped
    pub fn with_prevalence_blend(mut self, alpha: f64) -> Self {
        self.prevalence_blend = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_secondary(mut self, predictor: Arc<dyn SecondaryPredictor>) -> Self {
        self.secondary.push(predictor);
        self
    }

    pub fn knowledge(&self) -> &Arc<DiseaseKnowledge> {
        &self.knowledge
    }

    /// Names of the configured secondary sources
    pub fn secondary_names(&self) -> Vec<String> {
        self.secondary.iter().map(|p| p.name().to_string()).collect()
    }

    /// Rank diseases for the given symptoms.
    ///
    /// A set with no known tokens yields an empty list. An empty knowledge
    /// base is reported as [`DomainError::PredictionUnavailable`].
    pub fn predict(&self, symptoms: &SymptomSet) -> Result<Vec<Prediction>, DomainError> {
        if !symptoms.has_known() {
            return Ok(Vec::new());
        }
        if self.knowledge.is_empty() {
            return Err(DomainError::PredictionUnavailable(
                "knowledge base is empty".to_string(),
            ));
        }

        let mut candidates = self.dataset_candidates(symptoms);
        for predictor in &self.secondary {
            let tag = predictor.source();
            candidates.extend(
                predictor
                    .propose(symptoms, &self.knowledge)
                    .into_iter()
                    .map(|p| Prediction::new(p.disease, p.confidence, tag)),
            );
        }

        Ok(reconcile(candidates, self.top_k))
    }

    fn dataset_candidates(&self, symptoms: &SymptomSet) -> Vec<Prediction> {
        self.knowledge
            .diseases()
            .iter()
            .filter_map(|disease| {
                let matched = overlap(symptoms, disease);
                if matched == 0 {
                    return None;
                }
                let recall = matched as f64 / disease.symptoms.len() as f64;
                Some(Prediction::dataset(
                    disease.id.clone(),
                    blend_confidence(recall, disease.prevalence, self.prevalence_blend),
                ))
            })
            .collect()
    }
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("diseases", &self.knowledge.len())
            .field("secondary", &self.secondary_names())
            .field("top_k", &self.top_k)
            .field("prevalence_blend", &self.prevalence_blend)
            .finish()
    }
}
