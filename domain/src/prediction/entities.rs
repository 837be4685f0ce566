//! Prediction value objects

use serde::{Deserialize, Serialize};

/// Where a prediction came from.
///
/// The declaration order is also the tie-break priority: when two sources
/// give the same disease the same confidence, the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// Direct symptom overlap against the knowledge base
    Dataset,
    /// A trained classifier
    Model,
    /// Approximate phrase matching
    Heuristic,
}

impl PredictionSource {
    /// Lower value means higher precedence
    pub fn priority(&self) -> u8 {
        match self {
            PredictionSource::Dataset => 0,
            PredictionSource::Model => 1,
            PredictionSource::Heuristic => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSource::Dataset => "dataset",
            PredictionSource::Model => "model",
            PredictionSource::Heuristic => "heuristic",
        }
    }
}

impl std::fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A disease candidate with its confidence (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Disease identifier from the knowledge base
    pub disease: String,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    pub source: PredictionSource,
}

impl Prediction {
    /// Create a prediction, clamping the confidence into `[0, 1]`.
    ///
    /// `NaN` becomes `0.0`.
    pub fn new(disease: impl Into<String>, confidence: f64, source: PredictionSource) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            disease: disease.into(),
            confidence,
            source,
        }
    }

    pub fn dataset(disease: impl Into<String>, confidence: f64) -> Self {
        Self::new(disease, confidence, PredictionSource::Dataset)
    }

    pub fn model(disease: impl Into<String>, confidence: f64) -> Self {
        Self::new(disease, confidence, PredictionSource::Model)
    }

    pub fn heuristic(disease: impl Into<String>, confidence: f64) -> Self {
        Self::new(disease, confidence, PredictionSource::Heuristic)
    }

    /// Confidence as a whole percentage, for display
    pub fn percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}
