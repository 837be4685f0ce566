//! SymptomSet value object

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical symptom tokens extracted from free text (Value Object)
///
/// `known` tokens belong to the canonical vocabulary and take part in
/// matching. `unknown` tokens are kept only for diagnostics. Both are ordered
/// sets, so two sets built from the same tokens in any order compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSet {
    known: BTreeSet<String>,
    unknown: BTreeSet<String>,
}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from already-canonical known tokens
    pub fn from_known<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: tokens.into_iter().map(Into::into).collect(),
            unknown: BTreeSet::new(),
        }
    }

    pub fn insert_known(&mut self, token: impl Into<String>) {
        self.known.insert(token.into());
    }

    pub fn insert_unknown(&mut self, token: impl Into<String>) {
        self.unknown.insert(token.into());
    }

    pub fn known(&self) -> &BTreeSet<String> {
        &self.known
    }

    pub fn unknown(&self) -> &BTreeSet<String> {
        &self.unknown
    }

    /// Whether a known token is present
    pub fn contains(&self, token: &str) -> bool {
        self.known.contains(token)
    }

    /// No tokens at all, known or unknown
    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.unknown.is_empty()
    }

    pub fn has_known(&self) -> bool {
        !self.known.is_empty()
    }

    /// Number of known tokens
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Known tokens joined for display, e.g. `"cough, fever"`
    pub fn joined(&self) -> String {
        self.known.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}
