use std::env;
use std::path::PathBuf;

/// Runtime configuration for the fixture, passed into the router at
/// construction time so isolated test instances can run with distinct
/// secrets and upload directories in the same process.
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Host the server binds to and advertises in `server_url`
    pub host: String,

    /// Listening port (default: 8080)
    pub port: u16,

    /// Shared secret clients must present in `X-API-Key`
    pub api_key: String,

    /// Directory uploads are written to, created on startup if absent
    pub upload_dir: PathBuf,

    /// Client tuning values echoed back in the config document
    pub upload_interval_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub timeout_seconds: u64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_key: "test-api-key".to_string(),
            upload_dir: PathBuf::from("uploads"),
            upload_interval_seconds: 30,
            max_retries: 5,
            retry_delay_seconds: 20,
            timeout_seconds: 10,
        }
    }
}

impl FixtureConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            host: env::var("FIXTURE_HOST").unwrap_or(default.host),

            port: env::var("FIXTURE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            api_key: env::var("FIXTURE_API_KEY").unwrap_or(default.api_key),

            upload_dir: env::var("FIXTURE_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            upload_interval_seconds: env::var("FIXTURE_UPLOAD_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.upload_interval_seconds),

            max_retries: env::var("FIXTURE_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_retries),

            retry_delay_seconds: env::var("FIXTURE_RETRY_DELAY_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.retry_delay_seconds),

            timeout_seconds: env::var("FIXTURE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.timeout_seconds),
        }
    }

    /// Absolute URL clients should POST uploads to
    pub fn upload_url(&self) -> String {
        format!("http://{}:{}/upload", self.host, self.port)
    }

    /// `host:port` string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FixtureConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key, "test-api-key");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.upload_interval_seconds, 30);
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn test_upload_url() {
        let mut config = FixtureConfig::default();
        config.host = "10.0.0.7".to_string();
        config.port = 9999;
        assert_eq!(config.upload_url(), "http://10.0.0.7:9999/upload");
        assert_eq!(config.bind_addr(), "10.0.0.7:9999");
    }
}
