//! Partial phrase matching heuristic.
//!
//! Counts a disease symptom as partially matched when it is not present
//! verbatim but either
//!
//! - a known input token contains it word-for-word, or is contained in it
//!   (e.g. input "breath" against "shortness of breath"), or
//! - an unrecognized input phrase holds every content word of the symptom,
//!   in any order (e.g. "pain in my chest" against "chest pain").
//!
//! The resulting recall is discounted so that an exact dataset match of the
//! same breadth always outranks it.

use super::engine::{DEFAULT_PREVALENCE_BLEND, blend_confidence};
use super::entities::{Prediction, PredictionSource};
use super::source::SecondaryPredictor;
use crate::knowledge::DiseaseKnowledge;
use crate::symptom::normalizer::is_stop_word;
use crate::symptom::set::SymptomSet;

/// Multiplier applied to heuristic recall
pub const HEURISTIC_DISCOUNT: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct PartialPhraseHeuristic {
    prevalence_blend: f64,
}

impl PartialPhraseHeuristic {
    pub fn new(prevalence_blend: f64) -> Self {
        Self {
            prevalence_blend: prevalence_blend.clamp(0.0, 1.0),
        }
    }
}

impl Default for PartialPhraseHeuristic {
    fn default() -> Self {
        Self::new(DEFAULT_PREVALENCE_BLEND)
    }
}

/// Whether every word of `needle` appears contiguously in `haystack`
fn contains_words(haystack: &str, needle: &str) -> bool {
    let hay: Vec<&str> = haystack.split(' ').collect();
    let pin: Vec<&str> = needle.split(' ').collect();
    if pin.is_empty() || pin.len() > hay.len() {
        return false;
    }
    hay.windows(pin.len()).any(|w| w == pin.as_slice())
}

fn partially_matches(token: &str, symptom: &str) -> bool {
    token != symptom && (contains_words(symptom, token) || contains_words(token, symptom))
}

/// Drop a plural `s` so "aches" and "ache" compare equal
fn stem(word: &str) -> &str {
    if word.len() > 3 {
        word.strip_suffix('s').unwrap_or(word)
    } else {
        word
    }
}

fn content_words(phrase: &str) -> Vec<&str> {
    phrase
        .split(' ')
        .filter(|w| !w.is_empty() && !is_stop_word(w))
        .map(stem)
        .collect()
}

/// Whether one phrase holds every content word of the symptom
fn phrase_covers(phrase: &str, symptom: &str) -> bool {
    let wanted = content_words(symptom);
    if wanted.is_empty() {
        return false;
    }
    let words = content_words(phrase);
    wanted.iter().all(|w| words.contains(w))
}

impl SecondaryPredictor for PartialPhraseHeuristic {
    fn source(&self) -> PredictionSource {
        PredictionSource::Heuristic
    }

    fn name(&self) -> &str {
        "partial-phrase"
    }

    fn propose(&self, symptoms: &SymptomSet, knowledge: &DiseaseKnowledge) -> Vec<Prediction> {
        knowledge
            .diseases()
            .iter()
            .filter_map(|disease| {
                let mut exact = 0usize;
                let mut partial = 0usize;
                for symptom in &disease.symptoms {
                    if symptoms.contains(symptom) {
                        exact += 1;
                    } else if symptoms
                        .known()
                        .iter()
                        .any(|token| partially_matches(token, symptom))
                        || symptoms
                            .unknown()
                            .iter()
                            .any(|phrase| phrase_covers(phrase, symptom))
                    {
                        partial += 1;
                    }
                }
                if partial == 0 {
                    return None;
                }
                let recall = (exact + partial) as f64 / disease.symptoms.len() as f64;
                Some(Prediction::heuristic(
                    disease.id.clone(),
                    HEURISTIC_DISCOUNT
                        * blend_confidence(recall, disease.prevalence, self.prevalence_blend),
                ))
            })
            .collect()
    }
}
