//! Triage session domain.
//!
//! - [`entities::Session`] - a conversation with its turns and activity times
//! - [`entities::Turn`] - a single user or bot message
//! - [`repository::SessionStore`] - trait for concurrent session storage

pub mod entities;
pub mod repository;
