//! Application layer for symptom-triage
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::TriageConfig;
pub use ports::knowledge_source::{KnowledgeSourceError, KnowledgeSourcePort};
pub use use_cases::load_knowledge::LoadKnowledgeUseCase;
pub use use_cases::orchestrator::{
    ConversationOrchestrator, EndSessionOutput, HandleMessageOutput, HealthOutput, HistoryOutput,
    PredictOutput, StartSessionOutput,
};
pub use use_cases::triage::{TriageAssessment, TriagePipeline};
