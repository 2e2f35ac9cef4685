use chrono::Local;
use serde::Serialize;

/// Configuration document served to a sync client on `GET /config`.
/// Every field is present on every response.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub server_url: String,
    pub api_key: String,
    pub shared_path: String,
    pub upload_interval_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub timeout_seconds: u64,
    pub device_id: String,
    pub timestamp: String,
}

/// Acknowledgement returned for a persisted upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
    pub path: String,
    pub filename: String,
    pub size: usize,
    pub saved_as: String,
    pub timestamp: String,
}

/// Local time in ISO-8601 form, microsecond precision.
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
