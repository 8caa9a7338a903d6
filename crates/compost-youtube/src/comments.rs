//! Top-level comment fetching.
//!
//! The pagination loop is written against [`CommentSource`] so it does not
//! care whether pages come from the live API or from a test double.

use async_trait::async_trait;
use tracing::debug;

use compost_models::{Comment, PageToken, VideoId};

use crate::error::YoutubeResult;
use crate::metrics::record_comments_fetched;

/// Maximum page size accepted by `commentThreads.list`.
pub const PAGE_SIZE: u32 = 100;

/// One page of top-level comments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub next_page_token: Option<PageToken>,
}

/// Source of paged top-level comments for a video.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch one page of up to [`PAGE_SIZE`] comments.
    async fn comment_page(
        &self,
        video_id: &VideoId,
        page_token: Option<&PageToken>,
    ) -> YoutubeResult<CommentPage>;
}

#[async_trait]
impl<T: CommentSource + ?Sized> CommentSource for &T {
    async fn comment_page(
        &self,
        video_id: &VideoId,
        page_token: Option<&PageToken>,
    ) -> YoutubeResult<CommentPage> {
        (**self).comment_page(video_id, page_token).await
    }
}

/// Collect up to `max_comments` top-level comments, in API order.
///
/// Pages are requested one after another until the limit is reached or the
/// source stops returning a continuation token. The first failing page
/// aborts the whole fetch.
pub async fn fetch_comments<S>(
    source: &S,
    video_id: &VideoId,
    max_comments: usize,
) -> YoutubeResult<Vec<Comment>>
where
    S: CommentSource + ?Sized,
{
    let mut comments: Vec<Comment> = Vec::new();
    let mut page_token: Option<PageToken> = None;
    let mut pages = 0u32;

    while comments.len() < max_comments {
        let page = source.comment_page(video_id, page_token.as_ref()).await?;
        pages += 1;
        comments.extend(page.comments);

        debug!(
            video_id = %video_id,
            page = pages,
            fetched = comments.len(),
            "Fetched comment page"
        );

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    comments.truncate(max_comments);
    record_comments_fetched(comments.len());
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::error::YoutubeError;

    /// Serves canned pages and records the tokens it was asked for.
    struct ScriptedSource {
        pages: Vec<YoutubeResult<CommentPage>>,
        requested: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<YoutubeResult<CommentPage>>) -> Self {
            Self {
                pages,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<Option<String>> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommentSource for ScriptedSource {
        async fn comment_page(
            &self,
            _video_id: &VideoId,
            page_token: Option<&PageToken>,
        ) -> YoutubeResult<CommentPage> {
            let mut requested = self.requested.lock().unwrap();
            requested.push(page_token.map(|t| t.as_str().to_string()));
            match self.pages.get(requested.len() - 1) {
                Some(Ok(page)) => Ok(page.clone()),
                Some(Err(e)) => Err(YoutubeError::request_failed(e.to_string())),
                None => panic!("unexpected page request #{}", requested.len()),
            }
        }
    }

    fn page(texts: &[&str], next: Option<&str>) -> YoutubeResult<CommentPage> {
        Ok(CommentPage {
            comments: texts.iter().map(|t| Comment::from(*t)).collect(),
            next_page_token: next.map(|t| PageToken(t.to_string())),
        })
    }

    fn numbered(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}-{}", prefix, i)).collect()
    }

    fn video() -> VideoId {
        VideoId::from("dQw4w9WgXcQ")
    }

    fn refs(v: &[String]) -> Vec<&str> {
        v.iter().map(String::as_str).collect()
    }

    #[tokio::test]
    async fn test_single_short_page_stops_without_token() {
        let source = ScriptedSource::new(vec![page(&["a", "b", "c"], None)]);
        let comments = fetch_comments(&source, &video(), 5).await.unwrap();
        assert_eq!(comments, vec![Comment::from("a"), Comment::from("b"), Comment::from("c")]);
        assert_eq!(source.requests(), vec![None]);
    }

    #[tokio::test]
    async fn test_truncates_to_maximum() {
        let first = numbered("p1", 100);
        let second = numbered("p2", 100);
        let third = numbered("p3", 100);
        let source = ScriptedSource::new(vec![
            page(&refs(&first), Some("t1")),
            page(&refs(&second), Some("t2")),
            page(&refs(&third), Some("t3")),
        ]);

        let comments = fetch_comments(&source, &video(), 150).await.unwrap();
        assert_eq!(comments.len(), 150);
        assert_eq!(comments[0].as_str(), "p1-0");
        assert_eq!(comments[149].as_str(), "p2-49");
        // Stops once the limit is reached even though a token is present
        assert_eq!(source.requests(), vec![None, Some("t1".to_string())]);
    }

    #[tokio::test]
    async fn test_follows_tokens_until_exhausted() {
        let source = ScriptedSource::new(vec![
            page(&["a", "b"], Some("next-1")),
            page(&["c"], Some("next-2")),
            page(&["d"], None),
        ]);
        let comments = fetch_comments(&source, &video(), 200).await.unwrap();
        assert_eq!(comments.len(), 4);
        assert_eq!(
            source.requests(),
            vec![None, Some("next-1".to_string()), Some("next-2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_page_without_token() {
        let source = ScriptedSource::new(vec![page(&[], None)]);
        let comments = fetch_comments(&source, &video(), 200).await.unwrap();
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn test_zero_maximum_makes_no_request() {
        let source = ScriptedSource::new(vec![]);
        let comments = fetch_comments(&source, &video(), 0).await.unwrap();
        assert!(comments.is_empty());
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_page_failure_propagates() {
        let source = ScriptedSource::new(vec![
            page(&["a"], Some("t1")),
            Err(YoutubeError::from_http_status(403, "quotaExceeded")),
        ]);
        let err = fetch_comments(&source, &video(), 10).await.unwrap_err();
        assert!(err.to_string().contains("quotaExceeded"));
    }
}
