//! Background expiry of idle sessions.
//!
//! [`CleanupScheduler::start`] spawns one tokio task that sweeps the store on
//! a fixed interval. A failed sweep is logged and retried on the next tick.
//! The returned [`CleanupHandle`] stops the task and waits for it to finish.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use triage_domain::{Clock, SessionStore};

/// Periodic sweeper configuration
pub struct CleanupScheduler {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    ttl: Duration,
}

impl CleanupScheduler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        interval: Duration,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            interval,
            ttl,
        }
    }

    /// Run a single sweep now. Returns the number of sessions removed.
    pub async fn sweep_once(&self) -> usize {
        match self
            .store
            .expire_older_than(self.clock.now(), self.ttl)
            .await
        {
            Ok(removed) => {
                debug!("Cleanup sweep removed {} sessions", removed);
                removed
            }
            Err(e) => {
                warn!("Cleanup sweep failed, retrying next tick: {}", e);
                0
            }
        }
    }

    /// Spawn the sweep loop. The first sweep runs one interval from now.
    pub fn start(self) -> CleanupHandle {
        let token = CancellationToken::new();
        let child = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(
                "Cleanup scheduler started ({}s interval, {}s ttl)",
                self.interval.as_secs(),
                self.ttl.as_secs()
            );

            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        self.sweep_once().await;
                    }
                }
            }

            info!("Cleanup scheduler stopped");
        });

        CleanupHandle { token, task }
    }
}

/// Handle to a running [`CleanupScheduler`]
pub struct CleanupHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl CleanupHandle {
    /// Cancel the sweep loop and wait for it to exit
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            warn!("Cleanup scheduler task ended abnormally: {}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeDelta, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use triage_domain::{DomainError, ManualClock, Session, SessionId, SessionInfo, Turn};

    const INTERVAL: Duration = Duration::from_secs(5 * 60);
    const TTL: Duration = Duration::from_secs(30 * 60);

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_expires_idle_sessions() {
        let clock = Arc::new(ManualClock::starting_now());
        let store = Arc::new(InMemorySessionStore::new(clock.clone(), TTL));
        store.create().await;

        let handle =
            CleanupScheduler::new(store.clone(), clock.clone(), INTERVAL, TTL).start();

        clock.advance(TimeDelta::minutes(31));
        tokio::time::sleep(INTERVAL + Duration::from_secs(1)).await;

        assert_eq!(store.count().await, 0);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_keeps_fresh_sessions() {
        let clock = Arc::new(ManualClock::starting_now());
        let store = Arc::new(InMemorySessionStore::new(clock.clone(), TTL));
        store.create().await;

        let handle =
            CleanupScheduler::new(store.clone(), clock.clone(), INTERVAL, TTL).start();
        tokio::time::sleep(INTERVAL * 2 + Duration::from_secs(1)).await;

        assert_eq!(store.count().await, 1);
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_stop_joins_task() {
        let clock = Arc::new(ManualClock::starting_now());
        let store = Arc::new(InMemorySessionStore::new(clock.clone(), TTL));
        let handle = CleanupScheduler::new(store, clock, INTERVAL, TTL).start();
        assert!(handle.is_running());
        handle.stop().await;
    }

    /// Store whose sweeps always fail
    struct FailingStore {
        sweeps: AtomicUsize,
    }

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn create(&self) -> SessionId {
            SessionId::generate()
        }
        async fn get(&self, id: &SessionId) -> Result<Session, DomainError> {
            Err(DomainError::SessionNotFound(id.clone()))
        }
        async fn touch(&self, id: &SessionId) -> Result<(), DomainError> {
            Err(DomainError::SessionNotFound(id.clone()))
        }
        async fn append_turns(
            &self,
            id: &SessionId,
            _user: Turn,
            _bot: Turn,
        ) -> Result<(), DomainError> {
            Err(DomainError::SessionNotFound(id.clone()))
        }
        async fn end(&self, id: &SessionId) -> Result<(), DomainError> {
            Err(DomainError::SessionNotFound(id.clone()))
        }
        async fn expire_older_than(
            &self,
            _now: DateTime<Utc>,
            _ttl: Duration,
        ) -> Result<usize, DomainError> {
            self.sweeps.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::PredictionUnavailable("store offline".to_string()))
        }
        async fn info(&self, id: &SessionId) -> Result<SessionInfo, DomainError> {
            Err(DomainError::SessionNotFound(id.clone()))
        }
        async fn count(&self) -> usize {
            0
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_sweep_is_retried_next_tick() {
        let store = Arc::new(FailingStore {
            sweeps: AtomicUsize::new(0),
        });
        let clock = Arc::new(ManualClock::starting_now());
        let handle = CleanupScheduler::new(store.clone(), clock, INTERVAL, TTL).start();

        tokio::time::sleep(INTERVAL * 3 + Duration::from_secs(1)).await;

        assert_eq!(store.sweeps.load(Ordering::SeqCst), 3);
        assert!(handle.is_running());
        handle.stop().await;
    }
}
