//! Transcript retrieval abstraction.

use async_trait::async_trait;

use compost_models::{TranscriptSegment, VideoId};

use crate::error::YoutubeResult;

/// Source of timed captions for a video.
///
/// `Ok(None)` means the video has no transcript available; errors are
/// reserved for failures of the source itself.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(&self, video_id: &VideoId) -> YoutubeResult<Option<Vec<TranscriptSegment>>>;
}

#[async_trait]
impl<T: TranscriptSource + ?Sized> TranscriptSource for &T {
    async fn fetch_transcript(&self, video_id: &VideoId) -> YoutubeResult<Option<Vec<TranscriptSegment>>> {
        (**self).fetch_transcript(video_id).await
    }
}

/// Source that never has a transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranscripts;

#[async_trait]
impl TranscriptSource for NoTranscripts {
    async fn fetch_transcript(&self, _video_id: &VideoId) -> YoutubeResult<Option<Vec<TranscriptSegment>>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_transcripts() {
        let source = NoTranscripts;
        let video = VideoId::from("dQw4w9WgXcQ");
        assert_eq!(source.fetch_transcript(&video).await.unwrap(), None);
        assert_eq!((&source).fetch_transcript(&video).await.unwrap(), None);
    }
}
