//! Shared fixtures for use case tests

use crate::use_cases::triage::TriagePipeline;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use triage_domain::session::entities::ttl_delta;
use triage_domain::{
    Clock, DiseaseKnowledge, DomainError, PredictionEngine, Session, SessionId, SessionInfo,
    SessionStore, Turn,
};

pub fn sample_knowledge() -> DiseaseKnowledge {
    DiseaseKnowledge::builder()
        .disease(
            "Flu",
            ["fever", "cough", "fatigue", "body aches", "chills"],
            Some(0.8),
            false,
        )
        .disease(
            "Common Cold",
            ["cough", "runny nose", "sneezing", "sore throat"],
            Some(0.9),
            false,
        )
        .disease(
            "Migraine",
            ["headache", "nausea", "vomiting", "sensitivity to light"],
            Some(0.6),
            false,
        )
        .disease(
            "Gastroenteritis",
            ["nausea", "vomiting", "diarrhea", "abdominal pain"],
            Some(0.7),
            false,
        )
        .disease(
            "Heart Attack",
            ["chest pain", "shortness of breath", "sweating", "chest tightness"],
            Some(0.2),
            true,
        )
        .emergency_symptom("chest pain")
        .build()
        .unwrap()
}

pub fn sample_pipeline() -> TriagePipeline {
    TriagePipeline::new(PredictionEngine::new(Arc::new(sample_knowledge())))
}

/// Minimal store: one mutex over the whole map
pub struct MockSessionStore {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl MockSessionStore {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn with_live<T>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, DomainError> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(id) {
            Some(session) if !session.is_expired(now, ttl_delta(self.ttl)) => Ok(f(session)),
            _ => Err(DomainError::SessionNotFound(id.clone())),
        }
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn create(&self) -> SessionId {
        let id = SessionId::generate();
        let session = Session::new(id.clone(), self.clock.now());
        self.sessions.lock().unwrap().insert(id.clone(), session);
        id
    }

    async fn get(&self, id: &SessionId) -> Result<Session, DomainError> {
        self.with_live(id, |s| s.clone())
    }

    async fn touch(&self, id: &SessionId) -> Result<(), DomainError> {
        let now = self.clock.now();
        self.with_live(id, |s| s.touch(now))
    }

    async fn append_turns(
        &self,
        id: &SessionId,
        user: Turn,
        bot: Turn,
    ) -> Result<(), DomainError> {
        let now = self.clock.now();
        self.with_live(id, |s| s.append_exchange(user, bot, now))
    }

    async fn end(&self, id: &SessionId) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::SessionNotFound(id.clone()))
    }

    async fn expire_older_than(
        &self,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, ttl_delta(ttl)));
        Ok(before - sessions.len())
    }

    async fn info(&self, id: &SessionId) -> Result<SessionInfo, DomainError> {
        let now = self.clock.now();
        self.with_live(id, |s| s.info(now))
    }

    async fn count(&self) -> usize {
        let now = self.clock.now();
        self.sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| !s.is_expired(now, ttl_delta(self.ttl)))
            .count()
    }
}
