//! JSON request and response bodies.
//!
//! Field names match the wire format consumed by web clients. Timestamps are
//! RFC 3339 UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_application::{
    EndSessionOutput, HandleMessageOutput, HealthOutput, HistoryOutput, PredictOutput,
    StartSessionOutput,
};
use triage_domain::{DomainError, Prediction, Role, SessionId, SessionInfo, Turn};

/// Response to session start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: SessionId,
    pub message: String,
    pub greeting: String,
}

impl From<StartSessionOutput> for StartSessionResponse {
    fn from(out: StartSessionOutput) -> Self {
        Self {
            session_id: out.session_id,
            message: out.message,
            greeting: out.greeting,
        }
    }
}

/// Chat message request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRequest {
    pub session_id: SessionId,
    pub message: String,
}

/// Chat message response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub session_id: SessionId,
    pub response: String,
    pub predictions: Vec<Prediction>,
    pub symptoms: Vec<String>,
    pub is_emergency: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<HandleMessageOutput> for MessageResponse {
    fn from(out: HandleMessageOutput) -> Self {
        Self {
            session_id: out.session_id,
            response: out.reply,
            predictions: out.predictions,
            symptoms: out.symptoms,
            is_emergency: out.is_emergency,
            timestamp: out.timestamp,
        }
    }
}

/// One turn in a history response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<Prediction>>,
}

impl From<Turn> for HistoryEntry {
    fn from(turn: Turn) -> Self {
        Self {
            role: turn.role,
            content: turn.text,
            timestamp: turn.timestamp,
            predictions: turn.predictions,
        }
    }
}

/// Session history response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: SessionId,
    pub history: Vec<HistoryEntry>,
    pub timestamp: DateTime<Utc>,
}

impl From<HistoryOutput> for HistoryResponse {
    fn from(out: HistoryOutput) -> Self {
        Self {
            session_id: out.session_id,
            history: out.turns.into_iter().map(HistoryEntry::from).collect(),
            timestamp: out.timestamp,
        }
    }
}

/// Response to session end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndSessionResponse {
    pub message: String,
    pub session_id: SessionId,
}

impl From<EndSessionOutput> for EndSessionResponse {
    fn from(out: EndSessionOutput) -> Self {
        Self {
            message: out.message,
            session_id: out.session_id,
        }
    }
}

/// Stateless prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub symptoms: String,
}

/// Stateless prediction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub symptoms: String,
    pub predictions: Vec<Prediction>,
    pub recommendation: String,
    pub is_emergency: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<PredictOutput> for PredictResponse {
    fn from(out: PredictOutput) -> Self {
        Self {
            symptoms: out.symptoms,
            predictions: out.predictions,
            recommendation: out.recommendation,
            is_emergency: out.is_emergency,
            timestamp: out.timestamp,
        }
    }
}

/// Session metadata response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfoResponse {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub message_count: usize,
    pub age_minutes: f64,
}

impl From<SessionInfo> for SessionInfoResponse {
    fn from(info: SessionInfo) -> Self {
        Self {
            session_id: info.session_id,
            created_at: info.created_at,
            last_activity: info.last_activity,
            message_count: info.turn_count,
            age_minutes: info.age_minutes,
        }
    }
}

/// Health summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub diseases: usize,
    pub emergency_symptoms: usize,
    pub active_sessions: usize,
    pub sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<HealthOutput> for HealthResponse {
    fn from(out: HealthOutput) -> Self {
        let status = if out.diseases > 0 { "healthy" } else { "degraded" };
        let mut sources = vec!["dataset".to_string()];
        sources.extend(out.secondary_sources);
        Self {
            status: status.to_string(),
            diseases: out.diseases,
            emergency_symptoms: out.emergency_symptoms,
            active_sessions: out.active_sessions,
            sources,
            timestamp: out.timestamp,
        }
    }
}

/// Error body: a short machine-readable label and a human message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl From<&DomainError> for ErrorBody {
    fn from(err: &DomainError) -> Self {
        let message = match err {
            DomainError::SessionNotFound(_) => "Session not found or expired".to_string(),
            DomainError::InvalidInput(reason) => reason.clone(),
            DomainError::PredictionUnavailable(_) | DomainError::InvalidKnowledge(_) => {
                "Prediction is temporarily unavailable. Please try again later.".to_string()
            }
        };
        Self::new(err.kind().as_str(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_response_shape() {
        let timestamp = Utc::now();
        let response = MessageResponse::from(HandleMessageOutput {
            session_id: SessionId::from("s-1"),
            reply: "maybe flu".to_string(),
            predictions: vec![Prediction::dataset("flu", 0.5)],
            symptoms: vec!["fever".to_string()],
            unrecognized: vec![],
            is_emergency: false,
            timestamp,
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["session_id"], "s-1");
        assert_eq!(value["response"], "maybe flu");
        assert_eq!(
            value["predictions"],
            json!([{"disease": "flu", "confidence": 0.5, "source": "dataset"}])
        );
        assert_eq!(value["symptoms"], json!(["fever"]));
        assert_eq!(value["is_emergency"], false);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_history_entry_uses_content_field() {
        let entry = HistoryEntry::from(Turn::user("fever", Utc::now()));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(value["content"], "fever");
        assert!(value.get("predictions").is_none());
    }

    #[test]
    fn test_error_body_from_domain_error() {
        let body = ErrorBody::from(&DomainError::SessionNotFound(SessionId::from("x")));
        assert_eq!(body.error, "not_found");

        let body = ErrorBody::from(&DomainError::InvalidInput("message cannot be empty".into()));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "invalid_input", "message": "message cannot be empty"})
        );
    }

    #[test]
    fn test_requests_deserialize() {
        let req: MessageRequest =
            serde_json::from_str(r#"{"session_id": "abc", "message": "fever"}"#).unwrap();
        assert_eq!(req.session_id.as_str(), "abc");

        let req: PredictRequest = serde_json::from_str(r#"{"symptoms": "cough"}"#).unwrap();
        assert_eq!(req.symptoms, "cough");
    }
}
