//! Domain error types

use crate::session::entities::SessionId;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prediction unavailable: {0}")]
    PredictionUnavailable(String),

    #[error("Invalid knowledge base: {0}")]
    InvalidKnowledge(String),
}

/// Coarse classification of a [`DomainError`] for outer layers.
///
/// An HTTP adapter maps these to 404 / 400 / 503.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ClientError,
    Unavailable,
}

impl ErrorKind {
    /// HTTP-style status code for this kind of failure.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::ClientError => 400,
            ErrorKind::Unavailable => 503,
        }
    }

    /// Short machine-readable label used in error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::ClientError => "invalid_input",
            ErrorKind::Unavailable => "unavailable",
        }
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::SessionNotFound(_) => ErrorKind::NotFound,
            DomainError::InvalidInput(_) => ErrorKind::ClientError,
            DomainError::PredictionUnavailable(_) | DomainError::InvalidKnowledge(_) => {
                ErrorKind::Unavailable
            }
        }
    }

    /// Check if this error means the session is unknown, ended, or expired
    pub fn is_session_not_found(&self) -> bool {
        matches!(self, DomainError::SessionNotFound(_))
    }
}
