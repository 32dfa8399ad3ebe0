//! API request and response types

use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read a mutation body. Only bodies declared as `application/json` are
/// parsed; anything else, or JSON of the wrong shape, reads as the empty
/// object.
#[must_use]
pub fn lenient_body<T: DeserializeOwned + Default>(headers: &HeaderMap, body: &[u8]) -> T {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"));
    if !is_json {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_default()
}

/// Body of `POST /api/legislation/:id/vote`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VoteRequest {
    /// Kept loose so a missing or non-string value is reported as an
    /// invalid vote type instead of a body rejection
    #[serde(rename = "voteType", default)]
    pub vote_type: Option<Value>,
}

impl VoteRequest {
    /// The vote type as text; anything that is not a string reads as empty
    #[must_use]
    pub fn vote_type_str(&self) -> &str {
        self.vote_type
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Body of `POST /api/feedback`. The comment is free-form and never
/// validated, so any JSON value is taken.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub comment: Option<Value>,
}

impl FeedbackRequest {
    /// The comment as text. Missing or null is empty; other non-strings are
    /// their JSON text.
    #[must_use]
    pub fn comment_text(&self) -> String {
        match &self.comment {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Response for feedback submission
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub feedback_count: u64,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// WebSocket push frame
#[derive(Debug, Serialize, Deserialize)]
pub struct PushFrame {
    pub event: String,
    pub data: Value,
}
