//! Errors returned by the REST services.

use thiserror::Error;

/// Failure talking to the backend.
///
/// Variants hold rendered messages rather than source errors so controllers
/// can keep the last response around and compare it in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Server returned {status}: {}", .detail.as_deref().unwrap_or("no details"))]
    Status { status: u16, detail: Option<String> },
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a response body.
    ///
    /// The detail is the `message` field of a JSON object or the text of a
    /// JSON string, else the trimmed body. Empty bodies carry no detail.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::String(text)) => Some(text),
            Ok(value) => value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            Err(_) => None,
        };
        let detail = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            });
        ApiError::Status { status, detail }
    }

    /// Server-provided explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
