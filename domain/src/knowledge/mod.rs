//! Disease knowledge base.
//!
//! [`DiseaseKnowledge`] is built once at startup through
//! [`DiseaseKnowledgeBuilder`] and shared read-only afterwards. All symptom
//! names go through the same cleanup and synonym table as user text, so
//! matching compares canonical terms on both sides.

use crate::core::error::DomainError;
use crate::symptom::synonyms::{canonical_symptom, clean_phrase};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Prevalence used when a record does not specify one
pub const DEFAULT_PREVALENCE: f64 = 0.5;

/// One disease and its associated symptoms (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseEntry {
    /// Canonical identifier: cleaned lowercase name
    pub id: String,
    /// Display name as first seen in the source data
    pub name: String,
    pub symptoms: BTreeSet<String>,
    /// Relative prevalence in `[0, 1]`
    pub prevalence: f64,
    /// Whether the condition itself warrants prompt care
    pub emergency: bool,
}

/// Immutable disease-to-symptom association data
#[derive(Debug, Clone, Default)]
pub struct DiseaseKnowledge {
    diseases: Vec<DiseaseEntry>,
    emergency_symptoms: BTreeSet<String>,
    vocabulary: BTreeSet<String>,
}

impl DiseaseKnowledge {
    pub fn builder() -> DiseaseKnowledgeBuilder {
        DiseaseKnowledgeBuilder::default()
    }

    /// Diseases ordered by identifier
    pub fn diseases(&self) -> &[DiseaseEntry] {
        &self.diseases
    }

    pub fn get(&self, id: &str) -> Option<&DiseaseEntry> {
        self.diseases
            .binary_search_by(|d| d.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.diseases[i])
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    /// Every canonical symptom mentioned by any disease or the emergency list
    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    pub fn emergency_symptoms(&self) -> &BTreeSet<String> {
        &self.emergency_symptoms
    }

    pub fn is_emergency_symptom(&self, symptom: &str) -> bool {
        self.emergency_symptoms.contains(symptom)
    }
}

/// Accumulates raw disease records into a [`DiseaseKnowledge`].
///
/// Repeated records for the same disease are merged: symptom sets are
/// unioned, the highest prevalence is kept, and the emergency flag is set if
/// any record sets it.
#[derive(Debug, Default)]
pub struct DiseaseKnowledgeBuilder {
    diseases: BTreeMap<String, DiseaseEntry>,
    emergency_symptoms: BTreeSet<String>,
    errors: Vec<String>,
}

impl DiseaseKnowledgeBuilder {
    pub fn disease<I, S>(
        mut self,
        name: &str,
        symptoms: I,
        prevalence: Option<f64>,
        emergency: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_disease(name, symptoms, prevalence, emergency);
        self
    }

    pub fn add_disease<I, S>(
        &mut self,
        name: &str,
        symptoms: I,
        prevalence: Option<f64>,
        emergency: bool,
    ) where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = clean_phrase(name);
        if id.is_empty() {
            self.errors.push("disease name cannot be empty".to_string());
            return;
        }

        let prevalence = prevalence.unwrap_or(DEFAULT_PREVALENCE);
        if !(0.0..=1.0).contains(&prevalence) {
            self.errors.push(format!(
                "prevalence for '{}' must be within [0, 1], got {}",
                name.trim(),
                prevalence
            ));
            return;
        }

        let symptoms: BTreeSet<String> = symptoms
            .into_iter()
            .map(|s| canonical_symptom(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();

        let entry = self
            .diseases
            .entry(id.clone())
            .or_insert_with(|| DiseaseEntry {
                id,
                name: name.trim().to_string(),
                symptoms: BTreeSet::new(),
                prevalence,
                emergency,
            });
        entry.symptoms.extend(symptoms);
        entry.prevalence = entry.prevalence.max(prevalence);
        entry.emergency |= emergency;
    }

    pub fn emergency_symptom(mut self, symptom: &str) -> Self {
        self.add_emergency_symptom(symptom);
        self
    }

    pub fn add_emergency_symptom(&mut self, symptom: &str) {
        let symptom = canonical_symptom(symptom);
        if !symptom.is_empty() {
            self.emergency_symptoms.insert(symptom);
        }
    }

    /// Finish building.
    ///
    /// Fails if any record was invalid or a disease ended up with no
    /// symptoms.
    pub fn build(self) -> Result<DiseaseKnowledge, DomainError> {
        let mut errors = self.errors;
        for entry in self.diseases.values() {
            if entry.symptoms.is_empty() {
                errors.push(format!("disease '{}' has no symptoms", entry.name));
            }
        }
        if !errors.is_empty() {
            return Err(DomainError::InvalidKnowledge(errors.join("; ")));
        }

        let mut vocabulary: BTreeSet<String> = self
            .diseases
            .values()
            .flat_map(|d| d.symptoms.iter().cloned())
            .collect();
        vocabulary.extend(self.emergency_symptoms.iter().cloned());

        Ok(DiseaseKnowledge {
            diseases: self.diseases.into_values().collect(),
            emergency_symptoms: self.emergency_symptoms,
            vocabulary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_lookup() {
        let kb = DiseaseKnowledge::builder()
            .disease("Flu", ["fever", "cough"], Some(0.8), false)
            .disease("Cold", ["runny nose", "sneezing"], None, false)
            .emergency_symptom("Chest Pain")
            .build()
            .unwrap();

        assert_eq!(kb.len(), 2);
        let flu = kb.get("flu").unwrap();
        assert_eq!(flu.name, "Flu");
        assert_eq!(flu.prevalence, 0.8);
        assert_eq!(kb.get("cold").unwrap().prevalence, DEFAULT_PREVALENCE);
        assert!(kb.is_emergency_symptom("chest pain"));
        assert!(kb.vocabulary().contains("chest pain"));
        assert!(kb.vocabulary().contains("sneezing"));
    }

    #[test]
    fn test_symptoms_are_canonicalized() {
        let kb = DiseaseKnowledge::builder()
            .disease("Migraine", ["Head Pain", "nausea"], None, false)
            .build()
            .unwrap();
        assert!(kb.get("migraine").unwrap().symptoms.contains("headache"));
    }

    #[test]
    fn test_repeated_records_are_merged() {
        let kb = DiseaseKnowledge::builder()
            .disease("flu", ["fever"], Some(0.3), false)
            .disease("Flu", ["cough"], Some(0.7), true)
            .build()
            .unwrap();

        assert_eq!(kb.len(), 1);
        let flu = kb.get("flu").unwrap();
        assert_eq!(flu.symptoms.len(), 2);
        assert_eq!(flu.prevalence, 0.7);
        assert!(flu.emergency);
    }

    #[test]
    fn test_invalid_prevalence_rejected() {
        let err = DiseaseKnowledge::builder()
            .disease("flu", ["fever"], Some(1.5), false)
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidKnowledge(_)));
    }

    #[test]
    fn test_disease_without_symptoms_rejected() {
        let err = DiseaseKnowledge::builder()
            .disease("mystery", Vec::<String>::new(), None, false)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("mystery"));
    }

    #[test]
    fn test_empty_knowledge_builds() {
        let kb = DiseaseKnowledge::builder().build().unwrap();
        assert!(kb.is_empty());
    }
}
