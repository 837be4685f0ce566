//! JSON-lines request server.
//!
//! Reads one JSON request per line and writes one JSON response per line.
//! Each request names its operation in an `op` field:
//!
//! ```text
//! {"op":"start_session"}
//! {"op":"message","session_id":"…","message":"fever, cough"}
//! {"op":"history","session_id":"…"}
//! {"op":"end_session","session_id":"…"}
//! {"op":"session_info","session_id":"…"}
//! {"op":"predict","symptoms":"headache, nausea"}
//! {"op":"health"}
//! ```
//!
//! Responses are `{"status": <code>, "body": {…}}`, where `status` follows
//! HTTP conventions and failed requests carry an [`ErrorBody`].

use super::dto::{
    EndSessionResponse, ErrorBody, HealthResponse, HistoryResponse, MessageRequest,
    MessageResponse, PredictRequest, PredictResponse, SessionInfoResponse, StartSessionResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};
use triage_application::ConversationOrchestrator;
use triage_domain::{DomainError, SessionId};

/// Errors that stop the request loop
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A request line
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ApiRequest {
    StartSession,
    Message(MessageRequest),
    History { session_id: SessionId },
    EndSession { session_id: SessionId },
    SessionInfo { session_id: SessionId },
    Predict(PredictRequest),
    Health,
}

/// A response line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok<T: Serialize>(status: u16, body: T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(500, ErrorBody::new("internal", e.to_string())),
        }
    }

    fn error(status: u16, body: ErrorBody) -> Self {
        Self {
            status,
            body: serde_json::to_value(body).unwrap_or(Value::Null),
        }
    }

    fn from_domain(err: &DomainError) -> Self {
        Self::error(err.kind().status_code(), ErrorBody::from(err))
    }
}

/// Serves [`ApiRequest`]s against a [`ConversationOrchestrator`]
pub struct RequestServer {
    orchestrator: ConversationOrchestrator,
}

impl RequestServer {
    pub fn new(orchestrator: ConversationOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Dispatch one request
    pub async fn dispatch(&self, request: ApiRequest) -> ApiResponse {
        let o = &self.orchestrator;
        let result = match request {
            ApiRequest::StartSession => {
                return ApiResponse::ok(201, StartSessionResponse::from(o.start_session().await));
            }
            ApiRequest::Message(req) => o
                .handle_message(&req.session_id, &req.message)
                .await
                .map(|out| ApiResponse::ok(200, MessageResponse::from(out))),
            ApiRequest::History { session_id } => o
                .history(&session_id)
                .await
                .map(|out| ApiResponse::ok(200, HistoryResponse::from(out))),
            ApiRequest::EndSession { session_id } => o
                .end_session(&session_id)
                .await
                .map(|out| ApiResponse::ok(200, EndSessionResponse::from(out))),
            ApiRequest::SessionInfo { session_id } => o
                .session_info(&session_id)
                .await
                .map(|info| ApiResponse::ok(200, SessionInfoResponse::from(info))),
            ApiRequest::Predict(req) => o
                .predict_standalone(&req.symptoms)
                .map(|out| ApiResponse::ok(200, PredictResponse::from(out))),
            ApiRequest::Health => {
                return ApiResponse::ok(200, HealthResponse::from(o.health().await));
            }
        };

        result.unwrap_or_else(|e| {
            debug!("Request failed: {}", e);
            ApiResponse::from_domain(&e)
        })
    }

    /// Parse and dispatch one request line
    pub async fn handle_line(&self, line: &str) -> ApiResponse {
        match serde_json::from_str::<ApiRequest>(line) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                warn!("Malformed request: {}", e);
                ApiResponse::error(400, ErrorBody::new("bad_request", e.to_string()))
            }
        }
    }

    /// Serve until the reader reaches end of input.
    ///
    /// Requests run one at a time, in input order. Lines carry no request
    /// id, so the n-th response answers the n-th request, and a request sees
    /// every effect of the lines before it. Concurrent sessions are served
    /// by running several servers over one [`ConversationOrchestrator`].
    ///
    /// Returns the number of requests handled. Blank lines are skipped.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<usize, ServeError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut handled = 0;

        info!("Request server ready");
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = self.handle_line(line).await;
            let mut encoded = serde_json::to_vec(&response)?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
            handled += 1;
        }

        info!("Request server reached end of input after {} requests", handled);
        Ok(handled)
    }
}
