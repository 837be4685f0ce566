//! Prediction configuration from TOML (`[prediction]` section)

use serde::{Deserialize, Serialize};

/// Secondary classifier selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClassifierKind {
    /// Dataset and heuristic sources only
    #[default]
    None,
    /// Naive Bayes model fitted on the knowledge base
    NaiveBayes,
}

/// Raw prediction configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePredictionConfig {
    /// Maximum predictions returned
    pub top_k: usize,
    /// Weight of prevalence in the dataset score, within [0, 1]
    pub prevalence_blend: f64,
    /// Trained classifier used as the `model` source
    pub classifier: FileClassifierKind,
    /// Enable the partial-phrase `heuristic` source
    pub enable_heuristic: bool,
}

impl Default for FilePredictionConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            prevalence_blend: 0.2,
            classifier: FileClassifierKind::None,
            enable_heuristic: true,
        }
    }
}
