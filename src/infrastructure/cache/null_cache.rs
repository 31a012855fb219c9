//! Cache that stores nothing.

use async_trait::async_trait;
use tracing::debug;

use super::service::{CacheResult, CacheService};

/// Used when `REDIS_URL` is unset or Redis is down at startup.
/// Every lookup misses.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _hash: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _hash: &str, _target: &str, _ttl: Option<u64>) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
