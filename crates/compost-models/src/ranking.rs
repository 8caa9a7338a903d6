//! Ranked search results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::video::VideoSummary;

/// Component scores, each rounded to an integer percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoScores {
    pub underdog: u32,
    pub engagement: u32,
    pub transcript: u32,
    pub sentiment: u32,
    pub total: u32,
}

/// A search candidate with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedVideo {
    #[serde(flatten)]
    pub video: VideoSummary,

    /// Transcript quality in [0, 1], when one was measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_quality: Option<f64>,

    /// Seconds into the video where the query is best covered
    pub start_at: u64,

    pub has_transcript: bool,

    /// Comment sentiment signal clamped to [0, 1]
    pub sentiment: f64,

    pub scores: VideoScores,
}

/// Response of a ranking query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankingResponse {
    pub results: Vec<RankedVideo>,
    pub query: String,
    /// Query looks off-topic for study material
    pub nudge: bool,
}
