//! YouTube client configuration.

use std::time::Duration;

use crate::error::{YoutubeError, YoutubeResult};

/// Public Data API v3 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Configuration for [`crate::YoutubeClient`].
#[derive(Clone)]
pub struct YoutubeConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL of the Data API (overridable for mocks)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl YoutubeConfig {
    /// Create a config with default endpoint and timeouts.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Point the client at another endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create config from environment variables.
    ///
    /// `YOUTUBE_API_KEY` is required; everything else falls back to defaults.
    pub fn from_env() -> YoutubeResult<Self> {
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .map_err(|_| YoutubeError::config("YOUTUBE_API_KEY must be set"))?;

        if api_key.trim().is_empty() {
            return Err(YoutubeError::config("YOUTUBE_API_KEY cannot be empty"));
        }

        let base_url = std::env::var("YOUTUBE_API_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(api_key.trim())
            .with_base_url(base_url)
            .with_timeouts(
                Duration::from_secs(
                    std::env::var("YOUTUBE_API_TIMEOUT_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(30),
                ),
                Duration::from_secs(
                    std::env::var("YOUTUBE_CONNECT_TIMEOUT_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(10),
                ),
            ))
    }

    fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for YoutubeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
