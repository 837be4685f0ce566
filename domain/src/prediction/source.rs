//! Secondary prediction sources

use super::entities::{Prediction, PredictionSource};
use crate::knowledge::DiseaseKnowledge;
use crate::symptom::set::SymptomSet;

/// A prediction source consulted alongside the dataset overlap score.
///
/// Implementations must be pure: the same symptoms and knowledge always
/// yield the same candidates. Candidates whose `source` differs from
/// [`SecondaryPredictor::source`] are re-tagged by the engine.
pub trait SecondaryPredictor: Send + Sync {
    /// Tag applied to every candidate from this source
    fn source(&self) -> PredictionSource;

    /// Short name for diagnostics
    fn name(&self) -> &str;

    /// Propose candidates.
    ///
    /// The engine only consults secondary sources when `symptoms` holds at
    /// least one known token. Unrecognized phrases may be used as weaker
    /// evidence.
    fn propose(&self, symptoms: &SymptomSet, knowledge: &DiseaseKnowledge) -> Vec<Prediction>;
}
