//! Sentiment configuration.

/// Comments scored per video unless overridden.
pub const DEFAULT_MAX_COMMENTS: usize = 200;

#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// Upper bound on comments fetched and scored per video
    pub max_comments: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            max_comments: DEFAULT_MAX_COMMENTS,
        }
    }
}

impl SentimentConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_comments: std::env::var("SENTIMENT_MAX_COMMENTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_COMMENTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::remove_var("SENTIMENT_MAX_COMMENTS");
        assert_eq!(SentimentConfig::from_env().max_comments, 200);

        std::env::set_var("SENTIMENT_MAX_COMMENTS", "50");
        assert_eq!(SentimentConfig::from_env().max_comments, 50);

        std::env::set_var("SENTIMENT_MAX_COMMENTS", "lots");
        assert_eq!(SentimentConfig::from_env().max_comments, 200);

        std::env::remove_var("SENTIMENT_MAX_COMMENTS");
    }
}
