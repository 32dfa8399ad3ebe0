//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::sse_stream;
use super::types::{lenient_body, ErrorResponse, FeedbackRequest, FeedbackResponse, VoteRequest};
use super::ws::handle_socket;
use super::AppState;
use crate::store::{AppData, LegislationEntry, StoreError};
use axum::{
    body::Bytes,
    extract::{ws::WebSocketUpgrade, Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the web client
        .route("/", get(serve_spa))
        .route("/assets/*path", get(serve_static))
        // Full state read
        .route("/api/data", get(get_data))
        // Mutations
        .route("/api/legislation/:id/vote", post(vote_on_legislation))
        .route("/api/feedback", post(submit_feedback))
        // Push channel
        .route("/api/events", get(stream_events))
        .route("/api/ws", get(websocket))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Web Client
// ============================================================

async fn serve_spa() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// State Read
// ============================================================

async fn get_data(State(state): State<AppState>) -> Json<AppData> {
    tracing::debug!("GET /api/data");
    Json(state.store.snapshot().await)
}

// ============================================================
// Mutations
// ============================================================

// Bodies are read as raw bytes so an undeclared or unreadable body still
// reaches the id and vote type checks instead of being rejected by the
// extractor.

async fn vote_on_legislation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LegislationEntry>, AppError> {
    let req: VoteRequest = lenient_body(&headers, &body);
    let vote_type = req.vote_type_str();
    tracing::info!(legislation = %id, vote_type, "Vote received");

    let entry = state.store.vote(&id, vote_type).await?;
    Ok(Json(entry))
}

async fn submit_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<FeedbackResponse> {
    let comment = lenient_body::<FeedbackRequest>(&headers, &body).comment_text();
    tracing::info!(comment_len = comment.len(), "Feedback received (not stored)");

    let feedback_count = state.store.submit_feedback(&comment).await;
    Json(FeedbackResponse { feedback_count })
}

// ============================================================
// Push Channel
// ============================================================

async fn stream_events(State(state): State<AppState>) -> impl IntoResponse {
    sse_stream(state.broadcaster.subscribe())
}

async fn websocket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.broadcaster.subscribe()))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("civic-pulse ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::info!(error = %err, "Vote rejected");
        match err {
            StoreError::LegislationNotFound(_) => {
                AppError::NotFound("Legislation not found".to_string())
            }
            StoreError::InvalidVoteType(_) => AppError::BadRequest("Invalid vote type".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
