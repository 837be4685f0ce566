//! Multinomial naive Bayes over the knowledge base.
//!
//! Each disease is a class and each of its symptoms one observation, with
//! additive smoothing `α`:
//!
//! ```text
//! P(s | d) = (n(s, d) + α) / (|d| + α·|V|)
//! P(d)     = prevalence(d) / Σ prevalence
//! ```
//!
//! Only symptoms present in the input contribute evidence. Posteriors are
//! normalized over all diseases, and a disease is proposed only when it
//! shares at least one symptom with the input.

use std::collections::{BTreeSet, HashMap};
use tracing::debug;
use triage_domain::{
    DiseaseKnowledge, Prediction, PredictionSource, SecondaryPredictor, SymptomSet,
};

pub const DEFAULT_SMOOTHING: f64 = 1.0;

#[derive(Debug, Clone)]
struct ClassModel {
    disease: String,
    log_prior: f64,
    log_likelihood: HashMap<String, f64>,
    log_unseen: f64,
}

/// Naive Bayes classifier fitted once on a [`DiseaseKnowledge`]
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    classes: Vec<ClassModel>,
    vocabulary: BTreeSet<String>,
}

impl NaiveBayesClassifier {
    /// Fit with the default smoothing
    pub fn fit(knowledge: &DiseaseKnowledge) -> Self {
        Self::fit_with_smoothing(knowledge, DEFAULT_SMOOTHING)
    }

    pub fn fit_with_smoothing(knowledge: &DiseaseKnowledge, smoothing: f64) -> Self {
        let alpha = if smoothing > 0.0 { smoothing } else { DEFAULT_SMOOTHING };
        let vocabulary: BTreeSet<String> = knowledge
            .diseases()
            .iter()
            .flat_map(|d| d.symptoms.iter().cloned())
            .collect();
        let vocab_size = vocabulary.len() as f64;

        let total_prevalence: f64 = knowledge.diseases().iter().map(|d| d.prevalence).sum();
        let class_count = knowledge.len().max(1) as f64;

        let classes = knowledge
            .diseases()
            .iter()
            .map(|d| {
                let prior = if total_prevalence > 0.0 {
                    d.prevalence / total_prevalence
                } else {
                    1.0 / class_count
                };
                let denominator = d.symptoms.len() as f64 + alpha * vocab_size;
                let seen = ((1.0 + alpha) / denominator).ln();
                ClassModel {
                    disease: d.id.clone(),
                    // Zero-prevalence diseases keep a tiny prior so they stay rankable
                    log_prior: prior.max(f64::MIN_POSITIVE).ln(),
                    log_likelihood: d.symptoms.iter().map(|s| (s.clone(), seen)).collect(),
                    log_unseen: (alpha / denominator).ln(),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "Fitted naive Bayes on {} classes, {} features",
            classes.len(),
            vocabulary.len()
        );

        Self {
            classes,
            vocabulary,
        }
    }

    /// Posterior for every disease sharing a symptom with the input
    pub fn posteriors(&self, symptoms: &SymptomSet) -> Vec<(String, f64)> {
        let evidence: Vec<&str> = symptoms
            .known()
            .iter()
            .map(String::as_str)
            .filter(|s| self.vocabulary.contains(*s))
            .collect();
        if evidence.is_empty() || self.classes.is_empty() {
            return Vec::new();
        }

        let scores: Vec<f64> = self
            .classes
            .iter()
            .map(|class| {
                class.log_prior
                    + evidence
                        .iter()
                        .map(|s| {
                            class
                                .log_likelihood
                                .get(*s)
                                .copied()
                                .unwrap_or(class.log_unseen)
                        })
                        .sum::<f64>()
            })
            .collect();

        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = weights.iter().sum();

        self.classes
            .iter()
            .zip(weights)
            .filter(|(class, _)| evidence.iter().any(|s| class.log_likelihood.contains_key(*s)))
            .map(|(class, w)| (class.disease.clone(), w / total))
            .collect()
    }
}

impl SecondaryPredictor for NaiveBayesClassifier {
    fn source(&self) -> PredictionSource {
        PredictionSource::Model
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }

    fn propose(&self, symptoms: &SymptomSet, _knowledge: &DiseaseKnowledge) -> Vec<Prediction> {
        self.posteriors(symptoms)
            .into_iter()
            .map(|(disease, p)| Prediction::model(disease, p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use triage_domain::PredictionEngine;

    fn knowledge() -> DiseaseKnowledge {
        DiseaseKnowledge::builder()
            .disease("flu", ["fever", "cough", "fatigue", "chills"], Some(0.8), false)
            .disease("common cold", ["cough", "runny nose", "sneezing"], Some(0.9), false)
            .disease("migraine", ["headache", "nausea", "vomiting"], Some(0.6), false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_most_likely_class() {
        let nb = NaiveBayesClassifier::fit(&knowledge());
        let mut posteriors = nb.posteriors(&SymptomSet::from_known(["fever", "cough", "chills"]));
        posteriors.sort_by(|a, b| b.1.total_cmp(&a.1));
        assert_eq!(posteriors[0].0, "flu");
    }

    #[test]
    fn test_posteriors_are_probabilities() {
        let nb = NaiveBayesClassifier::fit(&knowledge());
        let posteriors = nb.posteriors(&SymptomSet::from_known(["cough"]));
        assert_eq!(posteriors.len(), 2);
        let sum: f64 = posteriors.iter().map(|(_, p)| p).sum();
        assert!(sum <= 1.0 + 1e-9);
        assert!(posteriors.iter().all(|(_, p)| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_no_evidence_yields_nothing() {
        let nb = NaiveBayesClassifier::fit(&knowledge());
        assert!(nb.posteriors(&SymptomSet::from_known(["rash"])).is_empty());
        assert!(nb.posteriors(&SymptomSet::new()).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let nb = NaiveBayesClassifier::fit(&knowledge());
        let input = SymptomSet::from_known(["headache", "nausea"]);
        assert_eq!(nb.posteriors(&input), nb.posteriors(&input));
    }

    #[test]
    fn test_engine_tags_model_source() {
        let kb = Arc::new(knowledge());
        let nb = Arc::new(NaiveBayesClassifier::fit(&kb));
        let engine = PredictionEngine::new(kb).with_secondary(nb);

        let predictions = engine
            .predict(&SymptomSet::from_known(["headache", "nausea", "vomiting"]))
            .unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].disease, "migraine");
        assert!(predictions[0].confidence > 0.0);
        assert_eq!(engine.secondary_names(), vec!["naive_bayes".to_string()]);
    }
}
