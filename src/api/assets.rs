//! Embedded web client
//!
//! In development, falls back to serving from filesystem.

use axum::{
    body::Body,
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::PathBuf;

#[derive(Embed)]
#[folder = "ui/dist"]
struct Assets;

/// Serve embedded static files, with filesystem fallback for development
pub async fn serve_static(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');
    if path.split('/').any(|segment| segment == "..") {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    if let Some(content) = Assets::get(path) {
        return with_mime(path, Body::from(content.data.into_owned()));
    }

    let fs_path = PathBuf::from("ui/dist").join(path);
    if let Ok(content) = tokio::fs::read(&fs_path).await {
        return with_mime(path, Body::from(content));
    }

    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Get the index.html content (embedded or from filesystem)
#[must_use]
pub fn get_index_html() -> Option<String> {
    if let Some(content) = Assets::get("index.html") {
        return String::from_utf8(content.data.into_owned()).ok();
    }

    std::fs::read_to_string("ui/dist/index.html").ok()
}

fn with_mime(path: &str, body: Body) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.as_ref().to_string())], body).into_response()
}
