//! Target cache for the redirect path.
//!
//! - [`RedisCache`] - used when `REDIS_URL` is configured
//! - [`NullCache`] - no-op fallback

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
#[cfg(test)]
pub use service::MockCacheService;
pub use service::{CacheError, CacheResult, CacheService};
