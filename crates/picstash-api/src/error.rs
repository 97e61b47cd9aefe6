//! Error types for the API client.

use serde_json::Value;

use crate::envelope::Envelope;

/// A specialized Result type for API calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors produced by API calls.
///
/// Calls fail in one of two lanes. Either the backend itself declared a
/// failure ([`ApiError::Backend`], carrying the raw unsanitized envelope), or
/// the transport faulted before an envelope could be interpreted — those
/// variants propagate unmodified and never trigger a user notification.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with `status: "failure"`.
    ///
    /// The envelope is the raw response object: `data` is unsanitized and
    /// `code`, `msg` and any extra backend fields stay reachable.
    #[error("backend failure: {}", .0.msg.as_deref().unwrap_or("(no message)"))]
    Backend(Envelope<Value>),

    /// Transport-level fault: connectivity, DNS, timeout, or a status the
    /// transport treats as exceptional.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A payload failed to serialize, or a success envelope did not match the
    /// expected payload type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request URL could not be constructed.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Check whether the backend itself reported this failure.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::Backend(_))
    }

    /// The backend error code, when the backend reported one.
    pub fn backend_code(&self) -> Option<&str> {
        match self {
            Self::Backend(envelope) => envelope.code.as_deref(),
            _ => None,
        }
    }

    /// The user-facing message carried by a backend failure.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Backend(envelope) => envelope.user_message(),
            _ => None,
        }
    }
}
