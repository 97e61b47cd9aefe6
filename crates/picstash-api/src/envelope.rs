//! The wire-level response envelope and null sanitation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend-reported outcome of a call.
///
/// The panel convention is lenient: anything that is not an explicit
/// `"failure"` is routed down the success path, so an absent `status`
/// deserializes as [`Status::Success`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The call succeeded; `data` carries the payload.
    #[default]
    Success,
    /// The backend declared a failure; `code` and `msg` describe it.
    Failure,
}

impl Status {
    /// Check whether this is an explicit failure.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failure)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// The response shape every backend call answers with.
///
/// Successful calls resolve with the *entire* envelope rather than the bare
/// payload; callers destructure [`data`](Envelope::data) themselves and keep
/// access to `code`, `msg` and any extra backend fields.
///
/// # Example
///
/// ```ignore
/// let envelope: Envelope<Vec<String>> = client.get("/api/tags", None::<&()>).await?;
/// let tags = envelope.into_data().unwrap_or_default();
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Backend-reported outcome.
    #[serde(default)]
    pub status: Status,
    /// Backend-defined error code; meaningful only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message; the user-facing text on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// The call's payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional backend-defined fields outside the fixed envelope.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> Envelope<T> {
    /// Check whether the envelope was routed down the success path.
    pub fn is_success(&self) -> bool {
        !self.status.is_failure()
    }

    /// Take the payload out of the envelope.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// The user-facing message, if the backend supplied a non-empty one.
    pub fn user_message(&self) -> Option<&str> {
        self.msg.as_deref().filter(|m| !m.is_empty())
    }
}

/// Recursively collapse explicit nulls to absent values.
///
/// Backends in this ecosystem emit explicit nulls for optional fields; UI
/// code written against "absent means unset" must not break. Object entries
/// whose value is null are removed (a missing key and an explicit null both
/// deserialize to `None`), array elements are recursed in place so order and
/// length are preserved, and scalars pass through unchanged.
///
/// Applied only to the success path; failure envelopes stay raw.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key, strip_nulls(value)))
                .collect(),
        ),
        other => other,
    }
}
