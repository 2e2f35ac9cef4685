use crate::AppState;
use crate::error::AppError;
use crate::handlers::json_utf8;
use crate::models::{ConfigResponse, timestamp_now};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize, Default)]
pub struct ConfigQuery {
    pub device_id: Option<String>,
}

/// `GET /config?device_id=<id>` — the configuration document a sync client
/// bootstraps from. A missing or malformed query falls back to the
/// `"unknown"` device id rather than failing.
pub async fn get_config(
    State(state): State<AppState>,
    query: Option<Query<ConfigQuery>>,
) -> Result<Response, AppError> {
    let device_id = query
        .and_then(|Query(q)| q.device_id)
        .unwrap_or_else(|| "unknown".to_string());

    let config = ConfigResponse {
        server_url: state.config.upload_url(),
        api_key: state.config.api_key.clone(),
        shared_path: "*".to_string(),
        upload_interval_seconds: state.config.upload_interval_seconds,
        max_retries: state.config.max_retries,
        retry_delay_seconds: state.config.retry_delay_seconds,
        timeout_seconds: state.config.timeout_seconds,
        device_id: device_id.clone(),
        timestamp: timestamp_now(),
    };

    info!("[CONFIG] Sent config to device {}", device_id);

    json_utf8(StatusCode::OK, &config)
}
