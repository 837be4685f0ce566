//! Disease prediction.
//!
//! - [`entities::Prediction`] - a ranked disease candidate
//! - [`engine::PredictionEngine`] - dataset overlap scoring plus secondary sources
//! - [`source::SecondaryPredictor`] - extension point for other sources
//! - [`heuristic::PartialPhraseHeuristic`] - approximate phrase matching source
//! - [`reconcile::reconcile`] - merge rule across sources

pub mod engine;
pub mod entities;
pub mod heuristic;
pub mod reconcile;
pub mod source;
