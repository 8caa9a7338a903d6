//! Parsing of user-supplied video references.
//!
//! Accepts a bare 11-character video id or any of the common YouTube URL
//! shapes:
//! - `https://www.youtube.com/watch?v=ID`
//! - `https://youtu.be/ID`
//! - `https://www.youtube.com/embed/ID`, `/v/ID`, `/shorts/ID`, `/live/ID`
//!
//! Scheme-less URLs (`youtube.com/watch?v=ID`) are accepted too.

use thiserror::Error;
use url::Url;

use crate::video::VideoId;

/// Length of every YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

const PATH_PREFIXES: &[&str] = &["embed", "v", "shorts", "live"];

/// Result type for video reference parsing.
pub type VideoRefResult<T> = Result<T, VideoRefError>;

/// Errors that can occur while parsing a video reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoRefError {
    #[error("Video reference is empty")]
    Empty,

    #[error("Not a YouTube URL: {0}")]
    NotYoutube(String),

    #[error("No video id found in URL: {0}")]
    IdNotFound(String),

    #[error("Invalid video id: {0}")]
    InvalidId(String),
}

/// Resolve a bare id or a YouTube URL to a validated [`VideoId`].
pub fn parse_video_ref(input: &str) -> VideoRefResult<VideoId> {
    let input = input.trim();
    if input.is_empty() {
        return Err(VideoRefError::Empty);
    }

    if !input.contains('/') && !input.contains('.') {
        return validate_id(input);
    }

    let url = parse_url(input)?;
    let host = url
        .host_str()
        .map(|h| h.trim_start_matches("www.").trim_start_matches("m.").to_ascii_lowercase())
        .unwrap_or_default();

    let candidate = match host.as_str() {
        "youtu.be" => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => id_from_youtube_url(&url),
        _ => return Err(VideoRefError::NotYoutube(input.to_string())),
    };

    match candidate {
        Some(id) if !id.is_empty() => validate_id(&id),
        _ => Err(VideoRefError::IdNotFound(input.to_string())),
    }
}

fn parse_url(input: &str) -> VideoRefResult<Url> {
    Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{}", input)))
        .map_err(|_| VideoRefError::NotYoutube(input.to_string()))
}

fn id_from_youtube_url(url: &Url) -> Option<String> {
    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        return Some(v.into_owned());
    }

    let mut segments = url.path_segments()?;
    let first = segments.next()?;
    if PATH_PREFIXES.contains(&first) {
        segments.next().map(str::to_string)
    } else {
        None
    }
}

fn validate_id(id: &str) -> VideoRefResult<VideoId> {
    let valid = id.len() == VIDEO_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(VideoId::from(id))
    } else {
        Err(VideoRefError::InvalidId(id.to_string()))
    }
}
