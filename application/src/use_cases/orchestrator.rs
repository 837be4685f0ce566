//! Conversation orchestrator.
//!
//! Drives the session lifecycle and routes each message through the
//! [`TriagePipeline`]. Validation happens before the store is touched, and
//! the pipeline runs without holding any session lock: the only store
//! mutation per message is the final atomic `append_turns`.
//!
//! | Operation | Store access |
//! |-----------|--------------|
//! | `start_session` | create |
//! | `handle_message` | get, append_turns |
//! | `history` | get |
//! | `end_session` | end |
//! | `predict_standalone` | none |

use crate::config::TriageConfig;
use crate::use_cases::triage::TriagePipeline;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use triage_domain::{
    Clock, DomainError, MessageText, Prediction, ReplyTemplate, SessionId, SessionInfo,
    SessionStore, Turn,
};

/// Output of [`ConversationOrchestrator::start_session`]
#[derive(Debug, Clone, PartialEq)]
pub struct StartSessionOutput {
    pub session_id: SessionId,
    pub message: String,
    pub greeting: String,
}

/// Output of [`ConversationOrchestrator::handle_message`]
#[derive(Debug, Clone, PartialEq)]
pub struct HandleMessageOutput {
    pub session_id: SessionId,
    pub reply: String,
    pub predictions: Vec<Prediction>,
    /// Canonical symptoms recognized in the message
    pub symptoms: Vec<String>,
    /// Phrases that matched no known symptom
    pub unrecognized: Vec<String>,
    pub is_emergency: bool,
    pub timestamp: DateTime<Utc>,
}

/// Output of [`ConversationOrchestrator::history`]
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryOutput {
    pub session_id: SessionId,
    pub turns: Vec<Turn>,
    pub timestamp: DateTime<Utc>,
}

/// Output of [`ConversationOrchestrator::end_session`]
#[derive(Debug, Clone, PartialEq)]
pub struct EndSessionOutput {
    pub session_id: SessionId,
    pub message: String,
}

/// Output of [`ConversationOrchestrator::predict_standalone`]
#[derive(Debug, Clone, PartialEq)]
pub struct PredictOutput {
    /// The validated input text
    pub symptoms: String,
    pub predictions: Vec<Prediction>,
    pub recommendation: String,
    pub is_emergency: bool,
    pub timestamp: DateTime<Utc>,
}

/// Output of [`ConversationOrchestrator::health`]
#[derive(Debug, Clone, PartialEq)]
pub struct HealthOutput {
    pub diseases: usize,
    pub emergency_symptoms: usize,
    pub active_sessions: usize,
    pub secondary_sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Use case entry point for every triage operation.
#[derive(Clone)]
pub struct ConversationOrchestrator {
    store: Arc<dyn SessionStore>,
    pipeline: Arc<TriagePipeline>,
    clock: Arc<dyn Clock>,
    config: TriageConfig,
}

impl ConversationOrchestrator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        pipeline: Arc<TriagePipeline>,
        clock: Arc<dyn Clock>,
        config: TriageConfig,
    ) -> Self {
        Self {
            store,
            pipeline,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Create a session and return the greeting.
    pub async fn start_session(&self) -> StartSessionOutput {
        let session_id = self.store.create().await;
        info!("Session {} started", session_id);
        StartSessionOutput {
            session_id,
            message: ReplyTemplate::session_started().to_string(),
            greeting: ReplyTemplate::greeting().to_string(),
        }
    }

    /// Handle one user message within a session.
    ///
    /// Errors leave the session unchanged: `InvalidInput` is raised before
    /// the store is consulted, and `PredictionUnavailable` before anything is
    /// appended.
    pub async fn handle_message(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<HandleMessageOutput, DomainError> {
        let message = MessageText::parse(text, self.config.max_message_chars)?;
        let received_at = self.clock.now();

        self.store.get(session_id).await?;

        let assessment = match self.pipeline.assess(message.as_str()) {
            Ok(assessment) => assessment,
            Err(e) => {
                warn!("Session {}: assessment failed: {}", session_id, e);
                return Err(e);
            }
        };
        debug!("Session {}: message {:?}", session_id, message.as_str());

        let replied_at = self.clock.now();
        let user = Turn::user(message.into_content(), received_at);
        let bot = Turn::bot(
            assessment.reply.clone(),
            replied_at,
            assessment.predictions.clone(),
        );
        self.store.append_turns(session_id, user, bot).await?;

        if assessment.is_emergency {
            warn!("Session {}: emergency indicators detected", session_id);
        }
        info!(
            "Session {}: {} predictions",
            session_id,
            assessment.predictions.len()
        );

        Ok(HandleMessageOutput {
            session_id: session_id.clone(),
            reply: assessment.reply,
            predictions: assessment.predictions,
            symptoms: assessment.symptoms.known().iter().cloned().collect(),
            unrecognized: assessment.symptoms.unknown().iter().cloned().collect(),
            is_emergency: assessment.is_emergency,
            timestamp: replied_at,
        })
    }

    /// Ordered turns of a live session.
    pub async fn history(&self, session_id: &SessionId) -> Result<HistoryOutput, DomainError> {
        let session = self.store.get(session_id).await?;
        Ok(HistoryOutput {
            session_id: session_id.clone(),
            turns: session.turns().to_vec(),
            timestamp: self.clock.now(),
        })
    }

    /// End a session. Ending twice is an error.
    pub async fn end_session(&self, session_id: &SessionId) -> Result<EndSessionOutput, DomainError> {
        self.store.end(session_id).await?;
        info!("Session {} ended", session_id);
        Ok(EndSessionOutput {
            session_id: session_id.clone(),
            message: ReplyTemplate::session_ended().to_string(),
        })
    }

    /// Metadata for a live session.
    pub async fn session_info(&self, session_id: &SessionId) -> Result<SessionInfo, DomainError> {
        self.store.info(session_id).await
    }

    /// Assess symptom text without a session.
    pub fn predict_standalone(&self, text: &str) -> Result<PredictOutput, DomainError> {
        let symptoms = MessageText::parse(text, self.config.max_symptoms_chars)?;
        let assessment = self.pipeline.assess(symptoms.as_str())?;
        Ok(PredictOutput {
            symptoms: symptoms.into_content(),
            predictions: assessment.predictions,
            recommendation: assessment.reply,
            is_emergency: assessment.is_emergency,
            timestamp: self.clock.now(),
        })
    }

    /// Knowledge base size and live session count.
    pub async fn health(&self) -> HealthOutput {
        let engine = self.pipeline.engine();
        HealthOutput {
            diseases: engine.knowledge().len(),
            emergency_symptoms: engine.knowledge().emergency_symptoms().len(),
            active_sessions: self.store.count().await,
            secondary_sources: engine.secondary_names(),
            timestamp: self.clock.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockSessionStore, sample_pipeline};
    use chrono::TimeDelta;
    use std::time::Duration;
    use triage_domain::{DiseaseKnowledge, ManualClock, PredictionEngine, Role};

    struct Fixture {
        clock: Arc<ManualClock>,
        store: Arc<MockSessionStore>,
        orchestrator: ConversationOrchestrator,
    }

    fn fixture_with(pipeline: TriagePipeline) -> Fixture {
        let clock = Arc::new(ManualClock::starting_now());
        let config = TriageConfig::default();
        let store = Arc::new(MockSessionStore::new(clock.clone(), config.session_ttl));
        let orchestrator =
            ConversationOrchestrator::new(store.clone(), Arc::new(pipeline), clock.clone(), config);
        Fixture {
            clock,
            store,
            orchestrator,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(sample_pipeline())
    }

    #[tokio::test]
    async fn test_start_session_greets() {
        let f = fixture();
        let started = f.orchestrator.start_session().await;
        assert_eq!(started.message, "Chat session started successfully");
        assert!(started.greeting.starts_with("Hello!"));

        let history = f.orchestrator.history(&started.session_id).await.unwrap();
        assert!(history.turns.is_empty());
    }

    #[tokio::test]
    async fn test_handle_message_appends_exchange() {
        let f = fixture();
        let id = f.orchestrator.start_session().await.session_id;

        let out = f.orchestrator.handle_message(&id, "fever, cough").await.unwrap();
        assert!(!out.is_emergency);
        assert_eq!(out.predictions[0].disease, "flu");
        assert_eq!(out.symptoms, vec!["cough".to_string(), "fever".to_string()]);

        let history = f.orchestrator.history(&id).await.unwrap();
        assert_eq!(history.turns.len(), 2);
        assert_eq!(history.turns[0].role, Role::User);
        assert_eq!(history.turns[0].text, "fever, cough");
        assert_eq!(history.turns[1].role, Role::Bot);
        assert_eq!(history.turns[1].text, out.reply);
        assert_eq!(history.turns[1].predictions.as_ref(), Some(&out.predictions));
    }

    #[tokio::test]
    async fn test_emergency_message() {
        let f = fixture();
        let id = f.orchestrator.start_session().await.session_id;
        let out = f
            .orchestrator
            .handle_message(&id, "chest pain, shortness of breath")
            .await
            .unwrap();
        assert!(out.is_emergency);
        assert_eq!(out.reply, ReplyTemplate::urgent_care());
    }

    #[tokio::test]
    async fn test_invalid_input_checked_before_store() {
        let f = fixture();
        let unknown = SessionId::from("no-such-session");

        let err = f.orchestrator.handle_message(&unknown, "   ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let long = "a".repeat(2001);
        let err = f.orchestrator.handle_message(&unknown, &long).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let f = fixture();
        let err = f
            .orchestrator
            .handle_message(&SessionId::from("missing"), "fever")
            .await
            .unwrap_err();
        assert!(err.is_session_not_found());
    }

    #[tokio::test]
    async fn test_end_then_use_fails() {
        let f = fixture();
        let id = f.orchestrator.start_session().await.session_id;

        let ended = f.orchestrator.end_session(&id).await.unwrap();
        assert_eq!(ended.message, "Chat session ended successfully");

        assert!(f.orchestrator.history(&id).await.unwrap_err().is_session_not_found());
        assert!(
            f.orchestrator
                .handle_message(&id, "fever")
                .await
                .unwrap_err()
                .is_session_not_found()
        );
        assert!(f.orchestrator.end_session(&id).await.unwrap_err().is_session_not_found());
    }

    #[tokio::test]
    async fn test_expired_session_is_not_found() {
        let f = fixture();
        let id = f.orchestrator.start_session().await.session_id;
        f.clock.advance(TimeDelta::minutes(31));
        assert!(f.orchestrator.history(&id).await.unwrap_err().is_session_not_found());
    }

    #[tokio::test]
    async fn test_activity_keeps_session_alive() {
        let f = fixture();
        let id = f.orchestrator.start_session().await.session_id;
        f.clock.advance(TimeDelta::minutes(20));
        f.orchestrator.handle_message(&id, "headache").await.unwrap();
        f.clock.advance(TimeDelta::minutes(20));

        let removed = f
            .store
            .expire_older_than(f.clock.now(), Duration::from_secs(30 * 60))
            .await
            .unwrap();
        assert_eq!(removed, 0);
        assert_eq!(f.orchestrator.history(&id).await.unwrap().turns.len(), 2);
    }

    #[tokio::test]
    async fn test_prediction_unavailable_leaves_session_unchanged() {
        let empty = PredictionEngine::new(Arc::new(DiseaseKnowledge::default()));
        let f = fixture_with(TriagePipeline::new(empty));
        let id = f.orchestrator.start_session().await.session_id;

        let err = f.orchestrator.handle_message(&id, "fever").await.unwrap_err();
        assert!(matches!(err, DomainError::PredictionUnavailable(_)));
        assert!(f.orchestrator.history(&id).await.unwrap().turns.is_empty());
    }

    #[tokio::test]
    async fn test_cross_path_consistency() {
        let f = fixture();
        let id = f.orchestrator.start_session().await.session_id;
        let text = "headache, nausea, vomiting";

        let session_path = f.orchestrator.handle_message(&id, text).await.unwrap();
        let stateless = f.orchestrator.predict_standalone(text).unwrap();
        assert_eq!(session_path.predictions, stateless.predictions);
        assert_eq!(stateless.predictions[0].disease, "migraine");
    }

    #[tokio::test]
    async fn test_predict_standalone_limits() {
        let f = fixture();
        let err = f.orchestrator.predict_standalone("").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let long = "a".repeat(1001);
        let err = f.orchestrator.predict_standalone(&long).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let out = f.orchestrator.predict_standalone("  fever, cough  ").unwrap();
        assert_eq!(out.symptoms, "fever, cough");
        assert!(!out.recommendation.is_empty());
    }

    #[tokio::test]
    async fn test_health_and_info() {
        let f = fixture();
        let id = f.orchestrator.start_session().await.session_id;
        f.orchestrator.handle_message(&id, "fever").await.unwrap();

        let health = f.orchestrator.health().await;
        assert_eq!(health.diseases, 5);
        assert_eq!(health.emergency_symptoms, 1);
        assert_eq!(health.active_sessions, 1);

        let info = f.orchestrator.session_info(&id).await.unwrap();
        assert_eq!(info.turn_count, 2);
        assert_eq!(info.session_id, id);

        f.clock.advance(TimeDelta::minutes(31));
        assert_eq!(f.orchestrator.health().await.active_sessions, 0);
    }
}
