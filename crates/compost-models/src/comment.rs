//! Comment text and pagination cursor types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plain text of one top-level comment.
///
/// Comments carry no identity beyond their text and are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Comment(pub String);

impl Comment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Comment {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Comment {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque continuation cursor returned by a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PageToken(pub String);

impl PageToken {
    /// Wrap a raw token, treating an empty string as "no further page".
    pub fn from_raw(raw: Option<String>) -> Option<Self> {
        raw.filter(|t| !t.is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
