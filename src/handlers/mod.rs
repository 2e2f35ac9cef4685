pub mod config;
pub mod upload;

use crate::error::AppError;
use axum::{
    body::Body,
    http::{StatusCode, header},
    response::Response,
};
use serde::Serialize;

/// Unmatched routes: a plain 404 with a one-line reason.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Serializes `value` to UTF-8 JSON (non-ASCII emitted literally) and sets
/// an explicit Content-Length matching the body's byte length.
pub(crate) fn json_utf8<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, AppError> {
    let body =
        serde_json::to_vec(value).map_err(|e| AppError::Internal(format!("serialize: {e}")))?;

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .map_err(|e| AppError::Internal(e.to_string()))
}
