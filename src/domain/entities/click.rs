//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// Caller metadata attached to a click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickProperties {
    pub ip: Option<String>,
    pub country: Option<String>,
    pub browser: Option<String>,
    pub platform: Option<String>,
    pub referrer: Option<String>,
}

/// One successful redirect of a short URL.
///
/// Append-only: clicks are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub hash: String,
    pub created: DateTime<Utc>,
    pub properties: ClickProperties,
}

impl Click {
    pub fn new(hash: String, created: DateTime<Utc>, properties: ClickProperties) -> Self {
        Self {
            hash,
            created,
            properties,
        }
    }
}
