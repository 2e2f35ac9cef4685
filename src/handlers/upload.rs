use crate::AppState;
use crate::error::AppError;
use crate::handlers::json_utf8;
use crate::models::{UploadResponse, timestamp_now};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::Response,
};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use tracing::{info, warn};

/// `POST /upload` — persists a raw binary document body under a
/// timestamped, sanitized name. Auth and length validation happen before
/// any of the body is read.
pub async fn upload_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, AppError> {
    let api_key = header_str(&headers, "X-API-Key", "");
    let doc_path = header_str(&headers, "X-Document-Path", "Unknown").to_string();
    let filename = header_str(&headers, "X-Filename", "unknown.rm").to_string();
    let content_length: i64 = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    if api_key != state.config.api_key {
        warn!("[UPLOAD] Rejected - invalid API key: {}", api_key);
        return Err(AppError::Unauthorized("Invalid API Key".to_string()));
    }

    if content_length <= 0 {
        warn!("[UPLOAD] Rejected - no content");
        return Err(AppError::BadRequest("No content".to_string()));
    }

    let expected = content_length as usize;
    let data = read_exact_body(body, expected).await?;

    let stored = state.store.store(&doc_path, &filename, &data).await?;

    info!(
        "[UPLOAD] Success: path={} filename={} expected={} received={} saved={} saved_as={}",
        doc_path,
        filename,
        expected,
        data.len(),
        stored.size_on_disk,
        stored.saved_as
    );

    let response = UploadResponse {
        status: "success".to_string(),
        message: "File uploaded successfully".to_string(),
        path: doc_path,
        filename,
        size: data.len(),
        saved_as: stored.saved_as,
        timestamp: timestamp_now(),
    };

    json_utf8(StatusCode::OK, &response)
}

/// Drains the request body and checks the byte count against the declared
/// Content-Length. A connection closed mid-body surfaces as a stream error
/// and takes the same incomplete-upload path as a short body.
async fn read_exact_body(body: Body, expected: usize) -> Result<Bytes, AppError> {
    // Cap the up-front reservation; a client may declare more than it sends.
    let mut data = BytesMut::with_capacity(expected.min(64 * 1024));
    let mut stream = body.into_data_stream();

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => data.extend_from_slice(&chunk),
            Err(e) => {
                warn!(
                    "[UPLOAD] Rejected - incomplete: {}/{} bytes ({})",
                    data.len(),
                    expected,
                    e
                );
                return Err(incomplete(data.len(), expected));
            }
        }
    }

    if data.len() != expected {
        warn!(
            "[UPLOAD] Rejected - incomplete: {}/{} bytes",
            data.len(),
            expected
        );
        return Err(incomplete(data.len(), expected));
    }

    Ok(data.freeze())
}

fn incomplete(got: usize, expected: usize) -> AppError {
    AppError::BadRequest(format!(
        "Incomplete upload: got {} bytes, expected {}",
        got, expected
    ))
}

/// Header lookup that tolerates non-ASCII UTF-8 bytes (document paths may
/// carry them); `HeaderValue::to_str` would reject those.
fn header_str<'a>(headers: &'a HeaderMap, name: &str, default: &'a str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .unwrap_or(default)
}
