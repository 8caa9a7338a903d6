//! Data API request/response types.
//!
//! Only the fields this crate reads are modelled; serde ignores the rest.

use serde::Deserialize;

use compost_models::{VideoId, VideoSummary};

/// `commentThreads.list` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub text_display: String,
}

impl CommentThread {
    /// Display text of the thread's top-level comment.
    pub fn into_text(self) -> String {
        self.snippet.top_level_comment.snippet.text_display
    }
}

/// `search.list` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub video_id: Option<String>,
}

/// `videos.list` response.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
    #[serde(default)]
    pub content_details: ContentDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Counts arrive as decimal strings and may be hidden by the uploader.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentDetails {
    #[serde(default)]
    pub duration: String,
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

impl From<VideoResource> for VideoSummary {
    fn from(video: VideoResource) -> Self {
        Self {
            id: VideoId::from(video.id),
            title: video.snippet.title,
            channel_title: video.snippet.channel_title,
            description: video.snippet.description,
            thumbnail: video.snippet.thumbnails.medium.map(|t| t.url),
            published_at: video.snippet.published_at,
            view_count: parse_count(video.statistics.view_count.as_deref()),
            like_count: parse_count(video.statistics.like_count.as_deref()),
            duration: video.content_details.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_thread_text_extraction() {
        let raw = r#"{
            "kind": "youtube#commentThreadListResponse",
            "nextPageToken": "QURTSl9p",
            "items": [
                {"snippet": {"videoId": "x", "topLevelComment": {"snippet": {"textDisplay": "first!", "likeCount": 3}}}},
                {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "great explanation"}}, "totalReplyCount": 2}}
            ]
        }"#;
        let response: CommentThreadListResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.next_page_token.as_deref(), Some("QURTSl9p"));
        let texts: Vec<String> = response.items.into_iter().map(CommentThread::into_text).collect();
        assert_eq!(texts, vec!["first!", "great explanation"]);
    }

    #[test]
    fn test_video_resource_conversion() {
        let raw = r#"{
            "id": "abcdefghijk",
            "snippet": {
                "title": "Photosynthesis explained",
                "channelTitle": "Bio Basics",
                "description": "Light reactions",
                "publishedAt": "2023-05-01T12:00:00Z",
                "thumbnails": {"medium": {"url": "https://i.ytimg.com/vi/abcdefghijk/mqdefault.jpg"}}
            },
            "statistics": {"viewCount": "1234"},
            "contentDetails": {"duration": "PT8M2S"}
        }"#;
        let video: VideoResource = serde_json::from_str(raw).unwrap();
        let summary = VideoSummary::from(video);
        assert_eq!(summary.id.as_str(), "abcdefghijk");
        assert_eq!(summary.view_count, 1234);
        assert_eq!(summary.like_count, 0);
        assert_eq!(summary.duration, "PT8M2S");
        assert!(summary.thumbnail.unwrap().ends_with("mqdefault.jpg"));
    }
}
