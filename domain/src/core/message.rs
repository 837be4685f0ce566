//! Message text value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// User-supplied symptom text that passed the entry checks (Value Object)
///
/// The text is trimmed and must be non-empty and at most `max_chars`
/// characters long. Nothing else about its content is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText {
    content: String,
}

impl MessageText {
    /// Validate raw text against the length limit
    pub fn parse(raw: &str, max_chars: usize) -> Result<Self, DomainError> {
        let content = raw.trim();
        if content.is_empty() {
            return Err(DomainError::InvalidInput(
                "message cannot be empty".to_string(),
            ));
        }

        let chars = content.chars().count();
        if chars > max_chars {
            return Err(DomainError::InvalidInput(format!(
                "message is too long ({} characters, max {})",
                chars, max_chars
            )));
        }

        Ok(Self {
            content: content.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for MessageText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
