//! Symptom vocabulary and normalization.
//!
//! - [`set::SymptomSet`] - deduplicated canonical tokens
//! - [`normalizer::SymptomNormalizer`] - free text to [`set::SymptomSet`]
//! - [`synonyms`] - the static synonym table

pub mod normalizer;
pub mod set;
pub mod synonyms;
