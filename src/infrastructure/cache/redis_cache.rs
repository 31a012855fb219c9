//! Redis-backed target cache.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

use super::service::{CacheError, CacheResult, CacheService};

const KEY_PREFIX: &str = "short:";

/// Fail-open: Redis errors are logged and reported as misses / no-ops.
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Connects and verifies the server answers PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is malformed or the
    /// server cannot be reached.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Invalid Redis URL: {}", e)))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut probe = conn.clone();
        probe
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            conn,
            default_ttl: default_ttl_seconds,
        })
    }
}

fn key(hash: &str) -> String {
    format!("{}{}", KEY_PREFIX, hash)
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, hash: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(key(hash)).await {
            Ok(target) => Ok(target),
            Err(e) => {
                warn!(hash, "Redis GET failed: {}", e);
                Ok(None)
            }
        }
    }

    async fn set_url(&self, hash: &str, target: &str, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        match conn.set_ex::<_, _, ()>(key(hash), target, ttl).await {
            Ok(()) => debug!(hash, ttl, "Cache SET"),
            Err(e) => warn!(hash, "Redis SET failed: {}", e),
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_namespaced() {
        assert_eq!(key("abc123"), "short:abc123");
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = RedisCache::connect("not a redis url", 60).await;
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }
}
