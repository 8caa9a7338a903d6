//! Mean comment sentiment for a video.

use tracing::{debug, info};

use compost_models::{Comment, SentimentRecord, VideoId};
use compost_youtube::{fetch_comments, CommentSource};

use crate::config::SentimentConfig;
use crate::error::SentimentResult;
use crate::scorer::PolarityScorer;

/// Fetches a video's comments and averages their compound scores.
pub struct SentimentAggregator<S, P> {
    source: S,
    scorer: P,
    config: SentimentConfig,
}

impl<S, P> SentimentAggregator<S, P>
where
    S: CommentSource,
    P: PolarityScorer,
{
    pub fn new(source: S, scorer: P, config: SentimentConfig) -> Self {
        Self {
            source,
            scorer,
            config,
        }
    }

    /// Score up to `max_comments` comments of a video.
    ///
    /// A fetch or scoring failure aborts the whole call.
    pub async fn analyze(&self, video_id: &VideoId) -> SentimentResult<SentimentRecord> {
        let comments = fetch_comments(&self.source, video_id, self.config.max_comments).await?;
        debug!(video_id = %video_id, count = comments.len(), "Scoring comments");

        let record = summarize(video_id, &comments, &self.scorer)?;
        if record.is_empty() {
            debug!(video_id = %video_id, "No comments to score");
            return Ok(record);
        }
        info!(
            video_id = %video_id,
            sentiment = record.sentiment,
            comment_count = record.comment_count,
            "Sentiment computed"
        );
        Ok(record)
    }
}

/// Average the compound scores of `comments`.
///
/// Scores are summed in comment order and divided by the count. No comments
/// yields [`SentimentRecord::empty`].
pub fn summarize<P>(
    video_id: &VideoId,
    comments: &[Comment],
    scorer: &P,
) -> SentimentResult<SentimentRecord>
where
    P: PolarityScorer + ?Sized,
{
    if comments.is_empty() {
        return Ok(SentimentRecord::empty());
    }

    let mut total = 0.0;
    for comment in comments {
        total += scorer.compound(comment.as_str())?;
    }

    Ok(SentimentRecord::new(
        video_id.clone(),
        total / comments.len() as f64,
        comments.len(),
    ))
}
