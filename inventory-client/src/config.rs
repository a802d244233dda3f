//! Client configuration

use std::path::PathBuf;

/// Default API root of a local inventory server
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Client configuration for connecting to the inventory API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | INVENTORY_API_URL | http://localhost:5000/api | API root |
/// | INVENTORY_TIMEOUT_SECS | 30 | Request timeout |
/// | INVENTORY_SNAPSHOT | (unset) | Local snapshot file |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g., "http://localhost:5000/api")
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Where the last successful product list is mirrored, if anywhere
    pub snapshot_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout: 30,
            snapshot_path: None,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config =
            Self::new(std::env::var("INVENTORY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()));
        if let Some(timeout) = std::env::var("INVENTORY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        config.snapshot_path = std::env::var("INVENTORY_SNAPSHOT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Mirror successful loads to a local snapshot file
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// URL of a stored image
    pub fn image_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.api_url, filename)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
