//! Transcript quality and best-start analysis.
//!
//! Quality favours lectures with few filler words and evenly sized
//! sentences. The start timestamp points at the stretch of captions that
//! mentions the query terms most.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use compost_models::TranscriptSegment;

/// Spoken fillers counted against a transcript.
pub const FILLER_WORDS: &[&str] = &[
    "um", "uh", "like", "you know", "basically", "actually",
    "literally", "right", "so yeah", "i mean", "kind of", "sort of",
];

/// Quality reported when there is no transcript.
pub const NEUTRAL_QUALITY: f64 = 0.5;

/// Consecutive segments scored together when looking for a start point.
pub const WINDOW_SEGMENTS: usize = 10;

/// Seconds rewound from a match so playback does not start mid-sentence.
pub const START_BUFFER_SECS: u64 = 2;

const FILLER_PENALTY: f64 = 20.0;
const VARIANCE_CAP: f64 = 200.0;
const FILLER_WEIGHT: f64 = 0.6;
const COHERENCE_WEIGHT: f64 = 0.4;

const MAX_WORD_SCORE: usize = 10;
const COVERAGE_BONUS: f64 = 20.0;
const EARLIER_TOLERANCE: f64 = 0.9;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

static FILLER_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| FILLER_WORDS.iter().filter_map(|w| word_pattern(w)).collect());

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
        "of", "with", "by", "from", "as", "is", "was", "are", "were", "be",
        "been", "being", "have", "has", "had", "do", "does", "did", "will",
        "would", "could", "should", "may", "might", "must", "can", "this",
        "that", "these", "those", "i", "you", "he", "she", "it", "we", "they",
        "what", "which", "who", "when", "where", "why", "how", "all", "each",
        "every", "both", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    ]
    .into_iter()
    .collect()
});

/// Result of [`analyze_transcript_quality`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscriptQuality {
    /// Combined score in [0, 1]
    pub quality_score: f64,
    /// Filler matches per word
    pub filler_density: f64,
    /// Mean words per sentence
    pub avg_sentence_length: f64,
}

impl TranscriptQuality {
    fn neutral() -> Self {
        Self {
            quality_score: NEUTRAL_QUALITY,
            filler_density: 0.0,
            avg_sentence_length: 0.0,
        }
    }
}

fn word_pattern(word: &str) -> Option<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(word))).ok()
}

fn joined_lowercase(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Score how clean and structured a transcript reads.
///
/// `quality = 0.6 * max(0, 1 - 20 * filler_density)
///          + 0.4 * (1 - min(sentence_length_variance / 200, 1))`.
/// An empty transcript is neutral.
pub fn analyze_transcript_quality(segments: &[TranscriptSegment]) -> TranscriptQuality {
    if segments.is_empty() {
        return TranscriptQuality::neutral();
    }

    let full_text = joined_lowercase(segments);
    let word_count = WHITESPACE.split(&full_text).count();
    if word_count == 0 {
        return TranscriptQuality::neutral();
    }

    let filler_count: usize = FILLER_PATTERNS
        .iter()
        .map(|re| re.find_iter(&full_text).count())
        .sum();
    let filler_density = filler_count as f64 / word_count as f64;

    let sentence_lengths: Vec<f64> = SENTENCE_END
        .split(&full_text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.split_whitespace().count() as f64)
        .collect();

    let (avg_len, variance) = if sentence_lengths.is_empty() {
        (0.0, 0.0)
    } else {
        let n = sentence_lengths.len() as f64;
        let avg = sentence_lengths.iter().sum::<f64>() / n;
        let var = sentence_lengths.iter().map(|len| (len - avg).powi(2)).sum::<f64>() / n;
        (avg, var)
    };
    let normalized_variance = (variance / VARIANCE_CAP).min(1.0);

    let filler_score = (1.0 - filler_density * FILLER_PENALTY).max(0.0);
    let coherence_score = (1.0 - normalized_variance).max(0.0);

    TranscriptQuality {
        quality_score: filler_score * FILLER_WEIGHT + coherence_score * COHERENCE_WEIGHT,
        filler_density,
        avg_sentence_length: avg_len,
    }
}

/// Meaningful lower-cased query terms of two or more characters.
///
/// Falls back to every two-plus character word when only stop words remain.
pub fn query_terms(query: &str) -> Vec<String> {
    let lower = query.to_lowercase();

    let terms: Vec<String> = WHITESPACE
        .split(&lower)
        .filter(|w| w.chars().count() >= 2 && !STOP_WORDS.contains(w))
        .map(|w| w.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_').collect::<String>())
        .filter(|w| w.chars().count() >= 2)
        .collect();

    if !terms.is_empty() {
        return terms;
    }

    WHITESPACE
        .split(&lower)
        .filter(|w| w.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Seconds into the video where the query is best covered.
///
/// Each run of [`WINDOW_SEGMENTS`] segments scores `min(2 * hits, 10)` per
/// matched term plus `20 * matched_terms / terms`. The best window's first
/// offset wins; an earlier window within 90% of the best score is preferred.
/// Without a scoring window, the first segment mentioning any term is used.
/// The result is rewound by [`START_BUFFER_SECS`], never below zero.
pub fn find_best_timestamp(segments: &[TranscriptSegment], query: &str) -> u64 {
    if segments.is_empty() {
        return 0;
    }

    let terms = query_terms(query);
    if terms.is_empty() {
        return 0;
    }
    let patterns: Vec<Regex> = terms.iter().filter_map(|t| word_pattern(t)).collect();

    let mut best_score = -1.0;
    let mut best_offset = 0;

    if segments.len() >= WINDOW_SEGMENTS {
        for (i, window) in segments.windows(WINDOW_SEGMENTS).enumerate() {
            let text = joined_lowercase(window);

            let mut score = 0.0;
            let mut matched = 0usize;
            for re in &patterns {
                let hits = re.find_iter(&text).count();
                if hits > 0 {
                    matched += 1;
                    score += (hits * 2).min(MAX_WORD_SCORE) as f64;
                }
            }
            score += matched as f64 / terms.len() as f64 * COVERAGE_BONUS;

            let offset = segments[i].offset;
            if score > best_score || (score >= best_score * EARLIER_TOLERANCE && offset < best_offset) {
                best_score = score;
                best_offset = offset;
            }
        }
    }

    if best_score > 0.0 {
        return best_offset.saturating_sub(START_BUFFER_SECS);
    }

    segments
        .iter()
        .find(|segment| {
            let text = segment.text.to_lowercase();
            terms.iter().any(|term| text.contains(term.as_str()))
        })
        .map(|segment| segment.offset.saturating_sub(START_BUFFER_SECS))
        .unwrap_or(0)
}
