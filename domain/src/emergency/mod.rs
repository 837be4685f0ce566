//! Emergency detection.
//!
//! A message is an emergency when its raw text matches one of the fixed
//! phrase patterns below, or when any known symptom token belongs to the
//! knowledge base's emergency-symptom subset.

use crate::knowledge::DiseaseKnowledge;
use crate::symptom::set::SymptomSet;
use regex::RegexSet;
use std::sync::{Arc, LazyLock};

/// Case-insensitive, word-bounded emergency phrases
const EMERGENCY_PATTERNS: &[&str] = &[
    r"(?i)\bchest pains?\b",
    r"(?i)\b(can['’]?t|cannot|can not|unable to|could not|couldn['’]?t) breathe\b",
    r"(?i)\b(difficulty|trouble|struggling) breathing\b",
    r"(?i)\bsevere (bleeding|headache|abdominal pain|stomach pain|chest pain|burns?|allergic reaction)\b",
    r"(?i)\bbleeding (heavily|profusely|that won['’]?t stop)\b",
    r"(?i)\b(unconscious|unresponsive|passed out)\b",
    r"(?i)\bloss of consciousness\b",
    r"(?i)\b(stroke|heart attack|anaphylaxis|seizures?)\b",
    r"(?i)\bslurred speech\b",
    r"(?i)\b(coughing|vomiting) (up )?blood\b",
    r"(?i)\bsuicidal\b",
];

static PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(EMERGENCY_PATTERNS).expect("emergency patterns are valid regular expressions")
});

/// Flags text that calls for urgent-care messaging
#[derive(Debug, Clone)]
pub struct EmergencyDetector {
    knowledge: Arc<DiseaseKnowledge>,
}

impl EmergencyDetector {
    pub fn new(knowledge: Arc<DiseaseKnowledge>) -> Self {
        Self { knowledge }
    }

    /// Whether the text or its extracted symptoms indicate an emergency
    pub fn detect(&self, text: &str, symptoms: &SymptomSet) -> bool {
        matches_emergency_phrase(text)
            || symptoms
                .known()
                .iter()
                .any(|s| self.knowledge.is_emergency_symptom(s))
    }
}

/// Whether the raw text matches any fixed emergency phrase
pub fn matches_emergency_phrase(text: &str) -> bool {
    PATTERNS.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> EmergencyDetector {
        let kb = DiseaseKnowledge::builder()
            .disease("epilepsy", ["seizure", "confusion"], None, true)
            .disease("migraine", ["headache", "nausea"], None, false)
            .emergency_symptom("seizure")
            .build()
            .unwrap();
        EmergencyDetector::new(Arc::new(kb))
    }

    #[test]
    fn test_emergency_phrases() {
        let d = detector();
        let empty = SymptomSet::new();
        assert!(d.detect("I have severe chest pain and can't breathe", &empty));
        assert!(d.detect("CHEST PAIN", &empty));
        assert!(d.detect("I cannot breathe", &empty));
        assert!(d.detect("my friend is unconscious", &empty));
        assert!(d.detect("there is severe bleeding from the cut", &empty));
    }

    #[test]
    fn test_non_emergency_text() {
        let d = detector();
        assert!(!d.detect("I have a mild headache", &SymptomSet::from_known(["headache"])));
        assert!(!d.detect("fever, cough", &SymptomSet::from_known(["fever", "cough"])));
    }

    #[test]
    fn test_word_boundaries() {
        // "strokes" of a brush is not "stroke" on a word boundary
        assert!(!matches_emergency_phrase("painting brushstrokes"));
        assert!(!matches_emergency_phrase("chest painting class"));
    }

    #[test]
    fn test_emergency_symptom_subset() {
        let d = detector();
        assert!(d.detect("something odd", &SymptomSet::from_known(["seizure"])));
        assert!(!d.detect("something odd", &SymptomSet::from_known(["confusion"])));
    }
}
