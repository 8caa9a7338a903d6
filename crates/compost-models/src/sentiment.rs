//! Sentiment summary record.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::video::VideoId;

/// Mean compound sentiment over a video's comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentRecord {
    /// Video the comments belong to. Absent on the empty summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<VideoId>,

    /// Arithmetic mean of per-comment compound scores, in [-1, 1]
    pub sentiment: f64,

    /// Number of comments that were scored
    pub comment_count: usize,
}

impl SentimentRecord {
    /// Create a summary for a video with at least one scored comment.
    pub fn new(video_id: VideoId, sentiment: f64, comment_count: usize) -> Self {
        Self {
            video_id: Some(video_id),
            sentiment,
            comment_count,
        }
    }

    /// Summary returned when a video has no comments.
    ///
    /// `sentiment` stays a float, so this serializes as
    /// `{"sentiment":0.0,"comment_count":0}` rather than an integer zero.
    pub fn empty() -> Self {
        Self {
            video_id: None,
            sentiment: 0.0,
            comment_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.comment_count == 0
    }
}
