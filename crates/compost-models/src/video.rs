//! Video identity and summary models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// YouTube video identifier (11 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Create from an existing string without validation.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Search candidate with the statistics used for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: VideoId,
    pub title: String,
    pub channel_title: String,
    pub description: String,

    /// Medium thumbnail URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// RFC 3339 publish time as reported by the API
    pub published_at: String,

    pub view_count: u64,
    pub like_count: u64,

    /// ISO 8601 duration (e.g. `PT12M3S`)
    #[serde(default)]
    pub duration: String,
}

impl VideoSummary {
    /// Likes per view, capped at 1. Zero views yields 0.
    pub fn like_ratio(&self) -> f64 {
        if self.view_count == 0 {
            return 0.0;
        }
        (self.like_count as f64 / self.view_count as f64).min(1.0)
    }
}
