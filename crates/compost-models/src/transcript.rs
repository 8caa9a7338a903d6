//! Timed caption text.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One caption line of a video transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    pub text: String,
    /// Start of the line, whole seconds from the beginning of the video
    pub offset: u64,
    /// Whole seconds the line stays on screen
    pub duration: u64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, offset: u64, duration: u64) -> Self {
        Self {
            text: text.into(),
            offset,
            duration,
        }
    }

    /// Build a segment from caption timings in milliseconds, truncating to
    /// whole seconds.
    pub fn from_millis(text: impl Into<String>, offset_ms: u64, duration_ms: u64) -> Self {
        Self::new(text, offset_ms / 1000, duration_ms / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_millis_truncates() {
        let segment = TranscriptSegment::from_millis("hello", 12_999, 2_500);
        assert_eq!(segment.offset, 12);
        assert_eq!(segment.duration, 2);
    }
}
