//! Cache trait and error types.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of `hash -> target` for the redirect path.
///
/// Short URLs never change once stored, so entries are only ever added and
/// left to expire. Callers treat any error as a miss and fall back to the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// `Ok(None)` on a miss.
    async fn get_url(&self, hash: &str) -> CacheResult<Option<String>>;

    /// Stores `target` under `hash`. `ttl_seconds = None` uses the backend default.
    async fn set_url(&self, hash: &str, target: &str, ttl_seconds: Option<u64>)
    -> CacheResult<()>;

    /// Reported by `GET /health`.
    async fn health_check(&self) -> bool;
}
