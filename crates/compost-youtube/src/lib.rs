//! YouTube Data API v3 client.
//!
//! This crate provides:
//! - Paged `commentThreads.list` access and the comment fetcher built on it
//! - Video search with statistics (`search.list` + `videos.list`)
//! - A transcript source seam
//! - Env-driven configuration and typed errors
//!
//! Nothing here retries: every API failure is returned to the caller.

pub mod client;
pub mod comments;
pub mod config;
pub mod error;
pub mod metrics;
pub mod search;
pub mod transcript;
pub mod types;

pub use client::YoutubeClient;
pub use comments::{fetch_comments, CommentPage, CommentSource, PAGE_SIZE};
pub use config::YoutubeConfig;
pub use error::{YoutubeError, YoutubeResult};
pub use search::VideoSearch;
pub use transcript::{NoTranscripts, TranscriptSource};
