//! Comment sentiment aggregation and video ranking.
//!
//! This crate provides:
//! - A polarity scoring seam with a VADER-backed implementation
//! - The sentiment aggregator (mean compound score over a video's comments)
//! - Transcript quality and best-start analysis
//! - Composite ranking of search candidates

pub mod aggregator;
pub mod config;
pub mod error;
pub mod ranking;
pub mod scorer;
pub mod transcript;

pub use aggregator::{summarize, SentimentAggregator};
pub use config::SentimentConfig;
pub use error::{SentimentError, SentimentResult};
pub use ranking::{score_videos, Candidate, Ranker};
pub use scorer::{PolarityScorer, VaderScorer};
pub use transcript::{analyze_transcript_quality, find_best_timestamp, TranscriptQuality};
