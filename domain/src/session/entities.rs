//! Session domain entities

use crate::prediction::entities::Prediction;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Unguessable session identifier (Value Object)
///
/// Generated from a random UUIDv4 (122 bits from the OS CSPRNG). Holding the
/// identifier is the only credential needed to use a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One message within a session (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Predictions attached to a bot turn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<Prediction>>,
}

impl Turn {
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp,
            predictions: None,
        }
    }

    pub fn bot(
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
        predictions: Vec<Prediction>,
    ) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            timestamp,
            predictions: Some(predictions),
        }
    }
}

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Active,
    Ended,
}

/// Convert a TTL into a chrono delta, saturating on overflow
pub fn ttl_delta(ttl: Duration) -> TimeDelta {
    TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX)
}

/// A triage conversation (Entity)
///
/// `last_activity` never moves backwards, and turns are kept in the order
/// their appends completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    turns: Vec<Turn>,
    state: SessionState,
}

impl Session {
    pub fn new(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            last_activity: now,
            turns: Vec::new(),
            state: SessionState::Active,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Record activity at `now`; earlier instants are ignored
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_activity {
            self.last_activity = now;
        }
    }

    /// Append a user/bot exchange and record activity
    pub fn append_exchange(&mut self, user: Turn, bot: Turn, now: DateTime<Utc>) {
        self.turns.reserve(2);
        self.turns.push(user);
        self.turns.push(bot);
        self.touch(now);
    }

    /// Mark the session ended and drop its history
    pub fn end(&mut self) {
        self.state = SessionState::Ended;
        self.turns.clear();
    }

    /// Whether the last activity is older than `now - ttl`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        match now.checked_sub_signed(ttl) {
            Some(cutoff) => self.last_activity < cutoff,
            None => false,
        }
    }

    pub fn info(&self, now: DateTime<Utc>) -> SessionInfo {
        SessionInfo {
            session_id: self.id.clone(),
            created_at: self.created_at,
            last_activity: self.last_activity,
            turn_count: self.turns.len(),
            age_minutes: (now - self.created_at).num_seconds() as f64 / 60.0,
        }
    }
}

/// Session metadata without the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub turn_count: usize,
    pub age_minutes: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_new_session_is_active_and_empty() {
        let now = Utc::now();
        let session = Session::new(SessionId::generate(), now);
        assert!(session.is_active());
        assert!(session.turns().is_empty());
        assert_eq!(session.created_at(), now);
        assert_eq!(session.last_activity(), now);
    }

    #[test]
    fn test_touch_is_monotonic() {
        let now = Utc::now();
        let mut session = Session::new(SessionId::generate(), now);
        session.touch(now + TimeDelta::seconds(10));
        session.touch(now + TimeDelta::seconds(5));
        assert_eq!(session.last_activity(), now + TimeDelta::seconds(10));
    }

    #[test]
    fn test_append_exchange_keeps_order() {
        let now = Utc::now();
        let mut session = Session::new(SessionId::generate(), now);
        let later = now + TimeDelta::seconds(1);
        session.append_exchange(
            Turn::user("fever", later),
            Turn::bot("maybe flu", later, vec![Prediction::dataset("flu", 0.5)]),
            later,
        );
        assert_eq!(session.turns().len(), 2);
        assert_eq!(session.turns()[0].role, Role::User);
        assert_eq!(session.turns()[1].role, Role::Bot);
        assert!(session.turns()[1].predictions.is_some());
        assert_eq!(session.last_activity(), later);
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let session = Session::new(SessionId::generate(), now);
        let ttl = TimeDelta::minutes(30);
        assert!(!session.is_expired(now + TimeDelta::minutes(30), ttl));
        assert!(session.is_expired(now + TimeDelta::minutes(31), ttl));
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let now = Utc::now();
        let session = Session::new(SessionId::generate(), now);
        let ttl = ttl_delta(Duration::MAX);
        assert!(!session.is_expired(now + TimeDelta::days(365), ttl));
    }

    #[test]
    fn test_user_turn_serializes_without_predictions() {
        let turn = Turn::user("hi", Utc::now());
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "user");
        assert!(json.get("predictions").is_none());
    }
}
