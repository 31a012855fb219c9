//! Per-hash redirect ceiling.

use std::sync::Arc;

use crate::domain::repositories::RedirectionCountRepository;

/// Redirects allowed per hash when nothing else is configured.
pub const DEFAULT_REDIRECT_LIMIT: u64 = 10;

/// Decides whether a short URL has used up its redirect quota.
///
/// The quota is an all-time ceiling for the lifetime of the process: counts are
/// never decayed and are lost on restart.
pub struct RedirectionLimitService {
    limit: u64,
    counts: Arc<dyn RedirectionCountRepository>,
}

impl RedirectionLimitService {
    pub fn new(limit: u64, counts: Arc<dyn RedirectionCountRepository>) -> Self {
        Self { limit, counts }
    }

    /// `true` once `id` has been redirected `limit` times.
    pub fn is_over_limit(&self, id: &str) -> bool {
        self.counts.get_count(id) >= self.limit
    }

    /// Records one redirect attempt for `id`, returning the new count.
    pub fn increment(&self, id: &str) -> u64 {
        self.counts.increment_count(id)
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}
