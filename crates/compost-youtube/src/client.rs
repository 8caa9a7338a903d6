//! Data API HTTP client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info_span, Instrument};

use compost_models::{Comment, PageToken, VideoId, VideoSummary};

use crate::comments::{CommentPage, CommentSource, PAGE_SIZE};
use crate::config::YoutubeConfig;
use crate::error::{YoutubeError, YoutubeResult};
use crate::metrics::record_request;
use crate::search::VideoSearch;
use crate::types::{CommentThread, CommentThreadListResponse, SearchListResponse, VideoListResponse};

/// Client for the YouTube Data API v3.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct YoutubeClient {
    http: Client,
    config: YoutubeConfig,
}

impl YoutubeClient {
    /// Create a new client.
    pub fn new(config: YoutubeConfig) -> YoutubeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("compost-youtube/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(YoutubeError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> YoutubeResult<Self> {
        Self::new(YoutubeConfig::from_env()?)
    }

    /// Fetch one page of top-level comment threads as plain text.
    pub async fn list_comment_threads(
        &self,
        video_id: &VideoId,
        page_token: Option<&PageToken>,
    ) -> YoutubeResult<CommentThreadListResponse> {
        let max_results = PAGE_SIZE.to_string();
        let mut query: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("videoId", video_id.as_str()),
            ("maxResults", &max_results),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.as_str()));
        }

        self.get_json("comment_threads", "commentThreads", &query).await
    }

    /// Run `search.list` and return the ids of matching captioned videos.
    pub async fn search_video_ids(&self, query: &str, max_results: u32) -> YoutubeResult<Vec<String>> {
        let max_results = max_results.to_string();
        let params: [(&str, &str); 6] = [
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", &max_results),
            ("relevanceLanguage", "en"),
            ("videoCaption", "closedCaption"),
        ];

        let response: SearchListResponse = self.get_json("search", "search", &params).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    /// Run `videos.list` for the given ids in a single request.
    pub async fn list_videos(&self, ids: &[String]) -> YoutubeResult<Vec<VideoSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let params: [(&str, &str); 2] = [
            ("part", "statistics,snippet,contentDetails"),
            ("id", &joined),
        ];

        let response: VideoListResponse = self.get_json("videos", "videos", &params).await?;
        Ok(response.items.into_iter().map(VideoSummary::from).collect())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        resource: &str,
        params: &[(&str, &str)],
    ) -> YoutubeResult<T> {
        let url = format!("{}/{}", self.config.base_url, resource);
        let span = info_span!("youtube_request", operation = %operation);

        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .get(&url)
                .query(params)
                .query(&[("key", self.config.api_key.as_str())])
                .send()
                .await?;

            let response = Self::check_status(response).await?;
            let body = response.bytes().await?;
            Ok::<T, YoutubeError>(serde_json::from_slice(&body)?)
        }
        .instrument(span)
        .await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(0),
        };
        record_request(operation, status, latency_ms);
        debug!(operation, status, latency_ms, "YouTube API request finished");

        result
    }

    async fn check_status(response: Response) -> YoutubeResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(YoutubeError::from_http_status(status.as_u16(), body))
    }
}

#[async_trait]
impl CommentSource for YoutubeClient {
    async fn comment_page(
        &self,
        video_id: &VideoId,
        page_token: Option<&PageToken>,
    ) -> YoutubeResult<CommentPage> {
        let response = self.list_comment_threads(video_id, page_token).await?;
        Ok(CommentPage {
            comments: response
                .items
                .into_iter()
                .map(|thread: CommentThread| Comment::from(thread.into_text()))
                .collect(),
            next_page_token: PageToken::from_raw(response.next_page_token),
        })
    }
}

#[async_trait]
impl VideoSearch for YoutubeClient {
    async fn search_videos(&self, query: &str, max_results: u32) -> YoutubeResult<Vec<VideoSummary>> {
        let ids = self.search_video_ids(query, max_results).await?;
        debug!(query, found = ids.len(), "Search returned video ids");
        self.list_videos(&ids).await
    }
}
