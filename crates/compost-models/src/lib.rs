//! Shared data models for the ComPost services.
//!
//! This crate provides Serde-serializable types for:
//! - Comments and pagination cursors
//! - Sentiment summaries
//! - Video summaries and ranking records
//! - Timed transcript segments
//! - Video reference parsing (bare ids and YouTube URLs)

pub mod comment;
pub mod ranking;
pub mod sentiment;
pub mod transcript;
pub mod video;
pub mod video_ref;

// Re-export common types
pub use comment::{Comment, PageToken};
pub use ranking::{RankedVideo, RankingResponse, VideoScores};
pub use sentiment::SentimentRecord;
pub use transcript::TranscriptSegment;
pub use video::{VideoId, VideoSummary};
pub use video_ref::{parse_video_ref, VideoRefError, VideoRefResult};
