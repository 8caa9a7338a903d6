//! YouTube client error types.

use thiserror::Error;

/// Result type for YouTube API operations.
pub type YoutubeResult<T> = Result<T, YoutubeError>;

/// Errors that can occur while talking to the Data API.
#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Invalid key, disabled comments or exhausted quota.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error {0}: {1}")]
    ServerError(u16, String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl YoutubeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    /// Map a non-success HTTP status to an error.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            400 => Self::BadRequest(body),
            401 | 403 => Self::Forbidden(body),
            404 => Self::NotFound(body),
            429 => Self::RateLimited(body),
            500..=599 => Self::ServerError(status, body),
            _ => Self::RequestFailed(format!("HTTP {}: {}", status, body)),
        }
    }

    /// HTTP status associated with the error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::RateLimited(_) => Some(429),
            Self::ServerError(status, _) => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert!(matches!(
            YoutubeError::from_http_status(400, "bad"),
            YoutubeError::BadRequest(_)
        ));
        assert!(matches!(
            YoutubeError::from_http_status(403, "commentsDisabled"),
            YoutubeError::Forbidden(_)
        ));
        assert!(matches!(
            YoutubeError::from_http_status(404, "videoNotFound"),
            YoutubeError::NotFound(_)
        ));
        assert!(matches!(
            YoutubeError::from_http_status(429, "slow down"),
            YoutubeError::RateLimited(_)
        ));
        assert!(matches!(
            YoutubeError::from_http_status(503, "unavailable"),
            YoutubeError::ServerError(503, _)
        ));
        assert!(matches!(
            YoutubeError::from_http_status(418, "teapot"),
            YoutubeError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_http_status_getter() {
        assert_eq!(YoutubeError::from_http_status(401, "").http_status(), Some(403));
        assert_eq!(YoutubeError::from_http_status(502, "").http_status(), Some(502));
        assert_eq!(YoutubeError::config("x").http_status(), None);
    }
}
