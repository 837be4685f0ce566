//! In-memory session store.
//!
//! Sessions live in a map guarded by a store-wide [`RwLock`]; each session
//! sits behind its own [`Mutex`], so requests on different sessions never
//! contend. Lock order is always store, then session, and the store lock is
//! released before a session lock is awaited on the request path.
//!
//! | Operation | Store lock | Session lock |
//! |-----------|-----------|--------------|
//! | `create` | write | - |
//! | `get` / `touch` / `append_turns` / `info` | read (clone `Arc`) | yes |
//! | `end` | write | yes (mark ended) |
//! | `expire_older_than` | read (scan), then write (remove) | yes |
//!
//! A removed session is marked [`SessionState::Ended`] under its own lock, so
//! a request that cloned the `Arc` before removal fails with
//! `SessionNotFound` instead of writing to a detached session.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use triage_domain::session::entities::ttl_delta;
use triage_domain::{
    Clock, DomainError, Session, SessionId, SessionInfo, SessionState, SessionStore, Turn,
};

type SessionSlot = Arc<Mutex<Session>>;

/// Volatile [`SessionStore`] with per-session locking and lazy expiry
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionSlot>>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl InMemorySessionStore {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock,
            ttl: ttl_delta(ttl),
        }
    }

    async fn slot(&self, id: &SessionId) -> Result<SessionSlot, DomainError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::SessionNotFound(id.clone()))
    }

    /// Run `f` on a live session.
    ///
    /// A session found expired is reported as not found and removed.
    async fn with_live<T>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut Session, DateTime<Utc>) -> T,
    ) -> Result<T, DomainError> {
        let slot = self.slot(id).await?;
        let mut session = slot.lock().await;
        let now = self.clock.now();

        if !session.is_active() {
            return Err(DomainError::SessionNotFound(id.clone()));
        }
        if session.is_expired(now, self.ttl) {
            let observed = session.last_activity();
            drop(session);
            self.remove_if_unchanged(id, &slot, observed).await;
            return Err(DomainError::SessionNotFound(id.clone()));
        }

        Ok(f(&mut session, now))
    }

    /// Remove `id` if it still maps to `slot` and has not been touched
    /// since `observed`. Returns whether it was removed.
    async fn remove_if_unchanged(
        &self,
        id: &SessionId,
        slot: &SessionSlot,
        observed: DateTime<Utc>,
    ) -> bool {
        let mut sessions = self.sessions.write().await;
        let Some(current) = sessions.get(id) else {
            return false;
        };
        if !Arc::ptr_eq(current, slot) {
            return false;
        }

        let mut session = slot.lock().await;
        if session.last_activity() != observed {
            return false;
        }
        session.end();
        drop(session);
        sessions.remove(id);
        true
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> SessionId {
        let id = SessionId::generate();
        let session = Session::new(id.clone(), self.clock.now());
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        debug!("Created session {}", id);
        id
    }

    async fn get(&self, id: &SessionId) -> Result<Session, DomainError> {
        self.with_live(id, |session, _| session.clone()).await
    }

    async fn touch(&self, id: &SessionId) -> Result<(), DomainError> {
        self.with_live(id, |session, now| session.touch(now)).await
    }

    async fn append_turns(
        &self,
        id: &SessionId,
        user: Turn,
        bot: Turn,
    ) -> Result<(), DomainError> {
        self.with_live(id, |session, now| session.append_exchange(user, bot, now))
            .await
    }

    async fn end(&self, id: &SessionId) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions
            .remove(id)
            .ok_or_else(|| DomainError::SessionNotFound(id.clone()))?;
        let mut session = slot.lock().await;
        let was_live = session.state() == SessionState::Active
            && !session.is_expired(self.clock.now(), self.ttl);
        session.end();
        if !was_live {
            return Err(DomainError::SessionNotFound(id.clone()));
        }
        debug!("Ended session {}", id);
        Ok(())
    }

    async fn expire_older_than(
        &self,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<usize, DomainError> {
        let ttl = ttl_delta(ttl);

        let snapshot: Vec<(SessionId, SessionSlot)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, slot)| (id.clone(), slot.clone()))
            .collect();

        let mut candidates = Vec::new();
        for (id, slot) in snapshot {
            let session = slot.lock().await;
            if session.is_expired(now, ttl) {
                let observed = session.last_activity();
                drop(session);
                candidates.push((id, slot, observed));
            }
        }

        let mut removed = 0;
        for (id, slot, observed) in candidates {
            if self.remove_if_unchanged(&id, &slot, observed).await {
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Expired {} idle sessions", removed);
        }
        Ok(removed)
    }

    async fn info(&self, id: &SessionId) -> Result<SessionInfo, DomainError> {
        self.with_live(id, |session, now| session.info(now)).await
    }

    /// Live sessions only: expired sessions awaiting a sweep are not counted.
    async fn count(&self) -> usize {
        let slots: Vec<SessionSlot> = self.sessions.read().await.values().cloned().collect();
        let now = self.clock.now();

        let mut live = 0;
        for slot in slots {
            let session = slot.lock().await;
            if session.is_active() && !session.is_expired(now, self.ttl) {
                live += 1;
            }
        }
        live
    }
}
