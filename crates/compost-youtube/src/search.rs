//! Video search abstraction.

use async_trait::async_trait;

use compost_models::VideoSummary;

use crate::error::YoutubeResult;

/// Search for captioned videos and return them with statistics.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search_videos(&self, query: &str, max_results: u32) -> YoutubeResult<Vec<VideoSummary>>;
}

#[async_trait]
impl<T: VideoSearch + ?Sized> VideoSearch for &T {
    async fn search_videos(&self, query: &str, max_results: u32) -> YoutubeResult<Vec<VideoSummary>> {
        (**self).search_videos(query, max_results).await
    }
}
