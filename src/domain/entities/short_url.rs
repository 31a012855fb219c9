//! Short URL entity and its redirect view.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status used for every redirect (307 Temporary Redirect).
pub const TEMPORARY_REDIRECT: u16 = 307;

/// Metadata captured when a short URL is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShortUrlProperties {
    pub ip: Option<String>,
    pub country: Option<String>,
    pub sponsor: Option<String>,
    pub safe: bool,
}

/// A persisted mapping from `hash` to `target`.
///
/// Immutable once stored. The hash is never reassigned to another target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub hash: String,
    pub target: String,
    pub created: DateTime<Utc>,
    pub properties: ShortUrlProperties,
}

impl ShortUrl {
    pub fn new(
        hash: String,
        target: String,
        created: DateTime<Utc>,
        properties: ShortUrlProperties,
    ) -> Self {
        Self {
            hash,
            target,
            created,
            properties,
        }
    }

    /// Redirect instruction for this short URL.
    pub fn redirection(&self) -> Redirection {
        Redirection::temporary(self.target.clone())
    }
}

/// Where to send the caller and with which HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub target: String,
    pub mode: u16,
}

impl Redirection {
    pub fn temporary(target: String) -> Self {
        Self {
            target,
            mode: TEMPORARY_REDIRECT,
        }
    }
}
