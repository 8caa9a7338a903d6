//! Composite ranking of search candidates.
//!
//! Weights: underdog 40%, engagement 20%, transcript 30%, sentiment 10%.
//! Scores are normalised to [0, 1] before weighting and reported as rounded
//! percentages.

use tracing::{info, warn};

use compost_models::{
    RankedVideo, RankingResponse, SentimentRecord, TranscriptSegment, VideoScores, VideoSummary,
};
use compost_youtube::{CommentSource, NoTranscripts, TranscriptSource, VideoSearch, YoutubeResult};

use crate::aggregator::SentimentAggregator;
use crate::error::{SentimentError, SentimentResult};
use crate::scorer::PolarityScorer;
use crate::transcript::{analyze_transcript_quality, find_best_timestamp};

const UNDERDOG_WEIGHT: f64 = 0.4;
const ENGAGEMENT_WEIGHT: f64 = 0.2;
const TRANSCRIPT_WEIGHT: f64 = 0.3;
const SENTIMENT_WEIGHT: f64 = 0.1;

/// Neutral value used when a signal is missing.
pub const NEUTRAL: f64 = 0.5;

/// Candidates searched per query.
pub const SEARCH_RESULTS: u32 = 15;

/// Candidates at or above this view count are not underdogs.
pub const MAX_VIEWS: u64 = 250_000;

/// Results returned per query.
pub const MAX_RESULTS: usize = 12;

/// Suffix steering search toward educational material.
const EDUCATIONAL_SUFFIX: &str = "explained tutorial";

/// Terms that flag a query as off-topic for study material.
const NON_ACADEMIC_TERMS: &[&str] = &[
    // Gaming
    "minecraft", "fortnite", "roblox", "valorant", "league of legends",
    "apex legends", "gta", "call of duty", "cod", "overwatch", "zelda",
    "mario", "pokemon", "elden ring", "smash bros", "fifa", "madden",
    "nba 2k", "among us", "lethal company", "baldurs gate", "skyrim",
    "gaming", "gameplay", "speedrun", "walkthrough", "playthrough",
    // Social media and streaming
    "tiktok", "instagram", "snapchat", "twitter", "twitch", "streamer",
    "youtube drama", "influencer", "viral", "trending", "challenge",
    // Entertainment
    "movie", "trailer", "netflix", "hulu", "disney plus", "anime",
    "manga", "kpop", "k-pop", "celebrity", "gossip", "drama",
    "reality tv", "bachelor", "love island",
    // Music
    "music", "song", "lyrics", "album", "concert", "playlist",
    "rapper", "drake", "taylor swift", "kendrick",
    // Other
    "vlog", "mukbang", "asmr", "prank", "unboxing", "haul",
    "meme", "funny", "compilation", "react", "reaction", "sushi",
];

/// A search result awaiting scoring.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub video: VideoSummary,
    /// Transcript quality in [0, 1], if it was measured
    pub transcript_quality: Option<f64>,
    /// Suggested playback start in seconds
    pub start_at: u64,
    pub has_transcript: bool,
    /// Sentiment signal in [0, 1]
    pub sentiment: f64,
}

impl Candidate {
    /// Candidate without transcript data.
    pub fn new(video: VideoSummary, sentiment: f64) -> Self {
        Self {
            video,
            transcript_quality: None,
            start_at: 0,
            has_transcript: false,
            sentiment,
        }
    }

    /// Attach a fetched transcript, measuring quality and start point.
    ///
    /// A failed or empty fetch leaves the candidate without transcript data.
    pub fn with_transcript(
        mut self,
        outcome: YoutubeResult<Option<Vec<TranscriptSegment>>>,
        query: &str,
    ) -> Self {
        let segments = match outcome {
            Ok(Some(segments)) if !segments.is_empty() => segments,
            Ok(_) => return self,
            Err(e) => {
                warn!(video_id = %self.video.id, "Transcript unavailable: {}", e);
                return self;
            }
        };

        self.transcript_quality = Some(analyze_transcript_quality(&segments).quality_score);
        self.start_at = find_best_timestamp(&segments, query);
        self.has_transcript = true;
        self
    }
}

/// True when the query mentions a non-academic topic.
pub fn is_off_topic(query: &str) -> bool {
    let lower = query.to_lowercase();
    NON_ACADEMIC_TERMS.iter().any(|term| lower.contains(term))
}

/// Search phrase actually sent to YouTube.
pub fn educational_query(query: &str) -> String {
    format!("{} {}", query, EDUCATIONAL_SUFFIX)
}

/// Min-max normalise; a constant series maps to [`NEUTRAL`].
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![NEUTRAL; values.len()];
    }
    values.iter().map(|v| (v - min) / (max - min)).collect()
}

/// Turn an aggregator outcome into a [0, 1] ranking signal.
///
/// Failures fall back to [`NEUTRAL`] so one video cannot sink the ranking.
pub fn sentiment_signal(video: &VideoSummary, outcome: SentimentResult<SentimentRecord>) -> f64 {
    match outcome {
        Ok(record) => record.sentiment.clamp(0.0, 1.0),
        Err(e) => {
            warn!(video_id = %video.id, "Sentiment unavailable, using neutral: {}", e);
            NEUTRAL
        }
    }
}

fn percent(x: f64) -> u32 {
    (x * 100.0).round() as u32
}

/// Score candidates relative to each other, preserving input order.
pub fn score_videos(candidates: Vec<Candidate>) -> Vec<RankedVideo> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let views: Vec<f64> = candidates.iter().map(|c| c.video.view_count as f64).collect();
    let normalized_views = normalize(&views);

    candidates
        .into_iter()
        .zip(normalized_views)
        .map(|(candidate, normalized_view)| {
            let underdog = 1.0 - normalized_view;
            let engagement = candidate.video.like_ratio();
            let transcript = candidate
                .transcript_quality
                .filter(|q| *q > 0.0)
                .unwrap_or(NEUTRAL);
            let sentiment = candidate.sentiment;

            let total = underdog * UNDERDOG_WEIGHT
                + engagement * ENGAGEMENT_WEIGHT
                + transcript * TRANSCRIPT_WEIGHT
                + sentiment * SENTIMENT_WEIGHT;

            RankedVideo {
                video: candidate.video,
                transcript_quality: candidate.transcript_quality,
                start_at: candidate.start_at,
                has_transcript: candidate.has_transcript,
                sentiment,
                scores: VideoScores {
                    underdog: percent(underdog),
                    engagement: percent(engagement),
                    transcript: percent(transcript),
                    sentiment: percent(sentiment),
                    total: percent(total),
                },
            }
        })
        .collect()
}

/// Sort by total score, best first, and keep the top [`MAX_RESULTS`].
pub fn top_ranked(mut ranked: Vec<RankedVideo>) -> Vec<RankedVideo> {
    ranked.sort_by(|a, b| b.scores.total.cmp(&a.scores.total));
    ranked.truncate(MAX_RESULTS);
    ranked
}

/// Searches, scores and ranks videos for a study query.
///
/// Transcripts are not consulted unless a source is attached with
/// [`Ranker::with_transcripts`].
pub struct Ranker<V, S, P, T = NoTranscripts> {
    search: V,
    sentiment: SentimentAggregator<S, P>,
    transcripts: T,
}

impl<V, S, P> Ranker<V, S, P, NoTranscripts> {
    pub fn new(search: V, sentiment: SentimentAggregator<S, P>) -> Self {
        Self {
            search,
            sentiment,
            transcripts: NoTranscripts,
        }
    }
}

impl<V, S, P, T> Ranker<V, S, P, T> {
    /// Measure transcripts from `source` when ranking.
    pub fn with_transcripts<U: TranscriptSource>(self, source: U) -> Ranker<V, S, P, U> {
        Ranker {
            search: self.search,
            sentiment: self.sentiment,
            transcripts: source,
        }
    }
}

impl<V, S, P, T> Ranker<V, S, P, T>
where
    V: VideoSearch,
    S: CommentSource,
    P: PolarityScorer,
    T: TranscriptSource,
{

    pub async fn rank(&self, query: &str) -> SentimentResult<RankingResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SentimentError::EmptyQuery);
        }

        let nudge = is_off_topic(query);
        let search_query = educational_query(query);
        info!(query = %search_query, nudge, "Searching videos");

        let videos = self.search.search_videos(&search_query, SEARCH_RESULTS).await?;
        let found = videos.len();

        let mut candidates = Vec::new();
        for video in videos.into_iter().filter(|v| v.view_count < MAX_VIEWS) {
            let outcome = self.sentiment.analyze(&video.id).await;
            let sentiment = sentiment_signal(&video, outcome);
            let transcript = self.transcripts.fetch_transcript(&video.id).await;
            candidates.push(Candidate::new(video, sentiment).with_transcript(transcript, query));
        }

        let results = top_ranked(score_videos(candidates));
        info!(found, returned = results.len(), "Ranking complete");

        Ok(RankingResponse {
            results,
            query: query.to_string(),
            nudge,
        })
    }
}
