//! Sentiment error types.

use thiserror::Error;

pub type SentimentResult<T> = Result<T, SentimentError>;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("YouTube error: {0}")]
    Youtube(#[from] compost_youtube::YoutubeError),

    #[error("Scoring failed: {0}")]
    Scoring(String),

    #[error("Query is required")]
    EmptyQuery,
}

impl SentimentError {
    pub fn scoring(msg: impl Into<String>) -> Self {
        Self::Scoring(msg.into())
    }
}
