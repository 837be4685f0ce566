//! Static synonym table and phrase cleanup shared by the normalizer and the
//! knowledge base builder.

use std::collections::HashMap;
use std::sync::LazyLock;

/// (variant, canonical) pairs. Variants are already in cleaned form.
const SYNONYMS: &[(&str, &str)] = &[
    // fever
    ("high temperature", "fever"),
    ("temperature", "fever"),
    ("high fever", "fever"),
    ("feverish", "fever"),
    ("pyrexia", "fever"),
    ("febrile", "fever"),
    // cough
    ("coughing", "cough"),
    ("dry cough", "cough"),
    ("persistent cough", "cough"),
    ("coughs", "cough"),
    // headache
    ("head pain", "headache"),
    ("head ache", "headache"),
    ("head hurts", "headache"),
    ("headaches", "headache"),
    ("pounding head", "headache"),
    // nausea / vomiting
    ("nauseous", "nausea"),
    ("nauseated", "nausea"),
    ("queasy", "nausea"),
    ("feeling sick", "nausea"),
    ("vomit", "vomiting"),
    ("throwing up", "vomiting"),
    ("threw up", "vomiting"),
    ("puking", "vomiting"),
    ("being sick", "vomiting"),
    // upper respiratory
    ("running nose", "runny nose"),
    ("nose running", "runny nose"),
    ("sniffles", "runny nose"),
    ("rhinorrhea", "runny nose"),
    ("sneeze", "sneezing"),
    ("sneezes", "sneezing"),
    ("throat pain", "sore throat"),
    ("scratchy throat", "sore throat"),
    ("throat hurts", "sore throat"),
    ("blocked nose", "congestion"),
    ("stuffy nose", "congestion"),
    ("nasal congestion", "congestion"),
    ("stuffed nose", "congestion"),
    ("cant smell", "loss of smell"),
    ("no sense of smell", "loss of smell"),
    ("cant taste", "loss of taste"),
    // breathing
    ("short of breath", "shortness of breath"),
    ("breathlessness", "shortness of breath"),
    ("breathless", "shortness of breath"),
    ("difficulty breathing", "shortness of breath"),
    ("trouble breathing", "shortness of breath"),
    ("hard to breathe", "shortness of breath"),
    ("cant breathe", "shortness of breath"),
    ("cannot breathe", "shortness of breath"),
    ("wheeze", "wheezing"),
    ("tight chest", "chest tightness"),
    ("chest pains", "chest pain"),
    // abdominal
    ("stomach ache", "abdominal pain"),
    ("stomachache", "abdominal pain"),
    ("stomach pain", "abdominal pain"),
    ("belly pain", "abdominal pain"),
    ("tummy ache", "abdominal pain"),
    ("stomach cramps", "abdominal pain"),
    ("loose stools", "diarrhea"),
    ("diarrhoea", "diarrhea"),
    ("the runs", "diarrhea"),
    ("heartburn", "acid reflux"),
    ("bloated", "bloating"),
    ("no appetite", "loss of appetite"),
    ("not hungry", "loss of appetite"),
    // general
    ("tired", "fatigue"),
    ("tiredness", "fatigue"),
    ("exhausted", "fatigue"),
    ("exhaustion", "fatigue"),
    ("lethargy", "fatigue"),
    ("weak", "weakness"),
    ("dizzy", "dizziness"),
    ("lightheaded", "dizziness"),
    ("light headed", "dizziness"),
    ("vertigo", "dizziness"),
    ("shivering", "chills"),
    ("shivers", "chills"),
    ("sweats", "sweating"),
    ("night sweats", "sweating"),
    ("body aches", "muscle ache"),
    ("body ache", "muscle ache"),
    ("muscle pain", "muscle ache"),
    ("aching muscles", "muscle ache"),
    ("myalgia", "muscle ache"),
    ("sore muscles", "muscle ache"),
    ("joint ache", "joint pain"),
    ("aching joints", "joint pain"),
    ("sore joints", "joint pain"),
    ("stiff neck", "neck stiffness"),
    ("light sensitivity", "sensitivity to light"),
    ("photophobia", "sensitivity to light"),
    ("blurry vision", "blurred vision"),
    ("thirsty", "excessive thirst"),
    ("always thirsty", "excessive thirst"),
    ("frequent urination", "frequent urination"),
    ("peeing a lot", "frequent urination"),
    ("burning urination", "painful urination"),
    ("burning when peeing", "painful urination"),
    // skin
    ("itchy", "itching"),
    ("itchiness", "itching"),
    ("itchy skin", "itching"),
    ("skin rash", "rash"),
    ("red spots", "rash"),
    ("yellow skin", "jaundice"),
    ("yellowing skin", "jaundice"),
    ("yellow eyes", "jaundice"),
    // neurological
    ("fits", "seizure"),
    ("seizures", "seizure"),
    ("convulsions", "seizure"),
    ("fainting", "loss of consciousness"),
    ("fainted", "loss of consciousness"),
    ("passed out", "loss of consciousness"),
    ("blacked out", "loss of consciousness"),
    ("slurring words", "slurred speech"),
    ("face drooping", "facial drooping"),
    ("drooping face", "facial drooping"),
    ("confused", "confusion"),
    ("coughing blood", "coughing up blood"),
    ("blood in cough", "coughing up blood"),
];

static SYNONYM_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SYNONYMS.iter().copied().collect());

/// Canonical form of a cleaned phrase, or the phrase itself
pub fn canonicalize(phrase: &str) -> &str {
    SYNONYM_MAP.get(phrase).copied().unwrap_or(phrase)
}

/// Every canonical term the synonym table maps to
pub fn canonical_terms() -> impl Iterator<Item = &'static str> {
    SYNONYMS.iter().map(|(_, canonical)| *canonical)
}

/// Lowercase, strip punctuation, and collapse whitespace.
///
/// Apostrophes are removed so that "can't" becomes "cant"; hyphens and any
/// other non-alphanumeric characters become word separators.
pub fn clean_phrase(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            cleaned.push(c);
        } else if c == '\'' || c == '\u{2019}' {
            continue;
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean and canonicalize a knowledge-base symptom name
pub fn canonical_symptom(raw: &str) -> String {
    let cleaned = clean_phrase(raw);
    canonicalize(&cleaned).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_phrase() {
        assert_eq!(clean_phrase("  Can't   Breathe!! "), "cant breathe");
        assert_eq!(clean_phrase("light-headed"), "light headed");
        assert_eq!(clean_phrase("Fever."), "fever");
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("high temperature"), "fever");
        assert_eq!(canonicalize("fever"), "fever");
        assert_eq!(canonicalize("unheard of"), "unheard of");
    }

    #[test]
    fn test_canonical_symptom_goes_through_cleanup() {
        assert_eq!(canonical_symptom("Head Pain"), "headache");
        assert_eq!(canonical_symptom("Can't breathe"), "shortness of breath");
    }

    #[test]
    fn test_variants_are_clean() {
        for (variant, canonical) in SYNONYMS {
            assert_eq!(&clean_phrase(variant), variant);
            assert_eq!(&clean_phrase(canonical), canonical);
        }
    }
}
