//! Free text to [`SymptomSet`] normalization.
//!
//! Text is split into fragments on punctuation delimiters and conjunctions,
//! then each fragment is scanned left to right for the longest word window
//! that resolves (directly or through the synonym table) to a vocabulary
//! term. Words left over are dropped if they are stop-words, otherwise they
//! are grouped into unknown phrases.

use super::set::SymptomSet;
use super::synonyms::{canonical_terms, canonicalize, clean_phrase};
use crate::knowledge::DiseaseKnowledge;
use std::collections::HashSet;

/// Characters that always end a symptom fragment
const DELIMITERS: &[char] = &[',', ';', '\n', '\r', '.', '!', '?', '/', '|', '&', '+'];

/// Words that join two symptoms within one fragment
const CONJUNCTIONS: &[&str] = &["and", "or", "with", "plus", "also", "but", "then"];

/// Longest word window tried against the vocabulary
const MAX_WINDOW: usize = 5;

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "am", "an", "any", "are", "as", "at", "awful", "bad", "be",
    "been", "being", "bit", "constant", "day", "days", "did", "do", "does", "doing", "experiencing",
    "extreme", "feel", "feeling", "feels", "felt", "for", "from", "get", "getting", "got", "had",
    "has", "have", "having", "hours", "i", "id", "im", "in", "is", "it", "its", "ive", "just",
    "kind", "last", "like", "little", "lot", "lots", "me", "mild", "minor", "moderate", "my",
    "night", "now", "of", "on", "pretty", "quite", "really", "severe", "since", "slight",
    "slightly", "so", "some", "sort", "still", "suffering", "symptom", "symptoms", "terrible",
    "that", "the", "there", "this", "to", "today", "very", "was", "week", "weeks", "were",
    "yesterday",
];

/// Whether a word carries no symptom meaning on its own
pub(crate) fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Turns free text into canonical symptom tokens.
///
/// The vocabulary is fixed at construction, so `normalize` is a pure
/// function of its input.
#[derive(Debug, Clone)]
pub struct SymptomNormalizer {
    vocabulary: HashSet<String>,
}

impl SymptomNormalizer {
    /// Create a normalizer over the given canonical terms plus every
    /// canonical term of the synonym table.
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab: HashSet<String> = vocabulary.into_iter().map(Into::into).collect();
        vocab.extend(canonical_terms().map(str::to_string));
        Self { vocabulary: vocab }
    }

    /// Create a normalizer whose vocabulary covers a knowledge base
    pub fn for_knowledge(knowledge: &DiseaseKnowledge) -> Self {
        Self::new(knowledge.vocabulary().iter().cloned())
    }

    /// Normalize free text into a [`SymptomSet`]
    pub fn normalize(&self, text: &str) -> SymptomSet {
        let mut set = SymptomSet::new();

        for fragment in text.split(DELIMITERS) {
            let cleaned = clean_phrase(fragment);
            if cleaned.is_empty() {
                continue;
            }
            let words: Vec<&str> = cleaned.split(' ').collect();
            for part in words.split(|w| CONJUNCTIONS.contains(w)) {
                self.scan(part, &mut set);
            }
        }

        set
    }

    fn scan(&self, words: &[&str], set: &mut SymptomSet) {
        let mut unmatched: Vec<&str> = Vec::new();
        let mut i = 0;

        while i < words.len() {
            match self.longest_match(&words[i..]) {
                Some((token, consumed)) => {
                    flush_unknown(&mut unmatched, set);
                    set.insert_known(token);
                    i += consumed;
                }
                None => {
                    if !is_stop_word(words[i]) {
                        unmatched.push(words[i]);
                    }
                    i += 1;
                }
            }
        }
        flush_unknown(&mut unmatched, set);
    }

    /// Longest window starting at `words[0]` that resolves to a known term
    fn longest_match(&self, words: &[&str]) -> Option<(String, usize)> {
        let max = words.len().min(MAX_WINDOW);
        for len in (1..=max).rev() {
            let candidate = words[..len].join(" ");
            let canonical = canonicalize(&candidate);
            if self.vocabulary.contains(canonical) {
                return Some((canonical.to_string(), len));
            }
            if len == 1
                && let Some(singular) = candidate.strip_suffix('s')
                && self.vocabulary.contains(canonicalize(singular))
            {
                return Some((canonicalize(singular).to_string(), 1));
            }
        }
        None
    }
}

fn flush_unknown(unmatched: &mut Vec<&str>, set: &mut SymptomSet) {
    if !unmatched.is_empty() {
        set.insert_unknown(unmatched.join(" "));
        unmatched.clear();
    }
}
