//! Per-text polarity scoring.

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::error::{SentimentError, SentimentResult};

/// Produces a compound polarity score in [-1, 1] for one text.
pub trait PolarityScorer: Send + Sync {
    fn compound(&self, text: &str) -> SentimentResult<f64>;
}

impl<T: PolarityScorer + ?Sized> PolarityScorer for &T {
    fn compound(&self, text: &str) -> SentimentResult<f64> {
        (**self).compound(text)
    }
}

/// VADER lexicon and rule based analyzer.
///
/// The lexicon is loaded once when the scorer is built and shared for the
/// scorer's lifetime.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for VaderScorer {
    fn compound(&self, text: &str) -> SentimentResult<f64> {
        let scores = self.analyzer.polarity_scores(text);
        let compound = scores
            .get("compound")
            .copied()
            .ok_or_else(|| SentimentError::scoring("analyzer returned no compound score"))?;

        if compound.is_finite() {
            Ok(compound)
        } else {
            Err(SentimentError::scoring(format!(
                "analyzer returned non-finite compound score {}",
                compound
            )))
        }
    }
}
