//! HTTP client for the civic API and its SSE push stream

use crate::api::{ErrorResponse, FeedbackResponse};
use crate::broadcast::{DecodeError, PushEvent};
use crate::store::{AppData, LegislationEntry, VoteKind};
use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};
use reqwest::header::ACCEPT;
use reqwest::{Response, StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("Push stream failed: {0}")]
    Stream(String),
    #[error("Bad push event: {0}")]
    Decode(#[from] DecodeError),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Read the full state
    ///
    /// # Errors
    ///
    /// Transport failure, a non-success status, or an undecodable body.
    pub async fn fetch_data(&self) -> ClientResult<AppData> {
        let response = self.http.get(self.url("/api/data")).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Cast a vote; returns the updated entry
    ///
    /// # Errors
    ///
    /// `Status` with 404 for an unknown id, or a transport failure.
    pub async fn vote(&self, id: &str, kind: VoteKind) -> ClientResult<LegislationEntry> {
        let response = self
            .http
            .post(self.url(&format!("/api/legislation/{id}/vote")))
            .json(&json!({ "voteType": kind.as_str() }))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Submit a feedback comment; returns the new counter value
    ///
    /// # Errors
    ///
    /// Transport failure or a non-success status.
    pub async fn submit_feedback(&self, comment: &str) -> ClientResult<u64> {
        let response = self
            .http
            .post(self.url("/api/feedback"))
            .json(&json!({ "comment": comment }))
            .send()
            .await?;
        let body: FeedbackResponse = check_status(response).await?.json().await?;
        Ok(body.feedback_count)
    }

    /// Open the push stream. Resolves once the server has registered the
    /// subscription, so any mutation made afterwards is delivered.
    ///
    /// # Errors
    ///
    /// Connecting fails or the server rejects the request. Errors while
    /// streaming are yielded as items.
    pub async fn events(&self) -> ClientResult<impl Stream<Item = ClientResult<PushEvent>>> {
        let response = self
            .http
            .get(self.url("/api/events"))
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;
        Ok(decode_events(check_status(response).await?.bytes_stream()))
    }
}

/// Parse a raw `text/event-stream` body into push events
fn decode_events<S, B, E>(body: S) -> impl Stream<Item = ClientResult<PushEvent>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    body.eventsource().map(|event| match event {
        Ok(event) => PushEvent::decode(&event.event, &event.data).map_err(ClientError::from),
        Err(e) => Err(ClientError::Stream(e.to_string())),
    })
}

async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    Err(ClientError::Status { status, message })
}
