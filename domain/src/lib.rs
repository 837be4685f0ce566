//! Domain layer for symptom-triage
//!
//! This crate contains the core triage logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Triage
//!
//! A free-text symptom description flows through a fixed pipeline:
//!
//! - **Normalization**: text becomes a [`SymptomSet`] of canonical symptoms
//! - **Prediction**: the [`PredictionEngine`] scores diseases from the
//!   knowledge base, merging secondary sources by maximum confidence
//! - **Emergency detection**: red-flag phrases and emergency symptoms
//!   override any prediction with an urgent-care reply
//!
//! ## Sessions
//!
//! A [`Session`] holds the turns of one conversation. Sessions expire after
//! a period of inactivity; [`SessionStore`] is the storage seam.

pub mod core;
pub mod emergency;
pub mod knowledge;
pub mod prediction;
pub mod reply;
pub mod session;
pub mod symptom;

// Re-export commonly used types
pub use core::{
    clock::{Clock, ManualClock, SystemClock},
    error::{DomainError, ErrorKind},
    message::MessageText,
};
pub use emergency::EmergencyDetector;
pub use knowledge::{DiseaseEntry, DiseaseKnowledge, DiseaseKnowledgeBuilder};
pub use prediction::{
    engine::PredictionEngine,
    entities::{Prediction, PredictionSource},
    heuristic::PartialPhraseHeuristic,
    reconcile::reconcile,
    source::SecondaryPredictor,
};
pub use reply::template::{ReplyKind, ReplyTemplate};
pub use session::{
    entities::{Role, Session, SessionId, SessionInfo, SessionState, Turn},
    repository::SessionStore,
};
pub use symptom::{normalizer::SymptomNormalizer, set::SymptomSet};
