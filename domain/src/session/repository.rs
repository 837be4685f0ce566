//! Session store trait

use super::entities::{Session, SessionId, SessionInfo, Turn};
use crate::core::error::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Concurrent keyed store of triage sessions.
///
/// This is a domain-level abstraction; the in-memory implementation lives
/// in the infrastructure layer. Every operation on a missing, ended, or
/// expired session fails with [`DomainError::SessionNotFound`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Register a new ACTIVE session with empty history
    async fn create(&self) -> SessionId;

    /// Snapshot of the session
    async fn get(&self, id: &SessionId) -> Result<Session, DomainError>;

    /// Update last activity to now
    async fn touch(&self, id: &SessionId) -> Result<(), DomainError>;

    /// Append both turns and touch, atomically: both or neither
    async fn append_turns(&self, id: &SessionId, user: Turn, bot: Turn)
    -> Result<(), DomainError>;

    /// Remove the session. Ending an absent session is an error.
    async fn end(&self, id: &SessionId) -> Result<(), DomainError>;

    /// Remove every session idle for longer than `ttl` as of `now`.
    ///
    /// Returns the number removed. A session touched after the scan
    /// observed it is kept.
    async fn expire_older_than(&self, now: DateTime<Utc>, ttl: Duration)
    -> Result<usize, DomainError>;

    /// Metadata for a live session
    async fn info(&self, id: &SessionId) -> Result<SessionInfo, DomainError>;

    /// Number of live sessions, excluding expired ones not yet swept
    async fn count(&self) -> usize;
}
