//! Process-local stores, lost on restart.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Click, ShortUrl};
use crate::domain::repositories::{ClickRepository, ShortUrlRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
pub struct InMemoryShortUrlRepository {
    short_urls: DashMap<String, ShortUrl>,
}

impl InMemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(self.short_urls.get(hash).map(|entry| entry.value().clone()))
    }

    async fn save(&self, short_url: ShortUrl) -> Result<ShortUrl, AppError> {
        let stored = self
            .short_urls
            .entry(short_url.hash.clone())
            .or_insert(short_url);
        Ok(stored.value().clone())
    }
}

/// Append-only click log.
#[derive(Debug, Default)]
pub struct InMemoryClickRepository {
    clicks: RwLock<Vec<Click>>,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every click logged so far, oldest first.
    pub async fn all(&self) -> Vec<Click> {
        self.clicks.read().await.clone()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn save(&self, click: Click) -> Result<Click, AppError> {
        self.clicks.write().await.push(click.clone());
        Ok(click)
    }

    async fn count_by_hash(&self, hash: &str) -> Result<u64, AppError> {
        let clicks = self.clicks.read().await;
        Ok(clicks.iter().filter(|click| click.hash == hash).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ClickProperties, ShortUrlProperties};
    use chrono::Utc;

    fn short_url(hash: &str, target: &str) -> ShortUrl {
        ShortUrl::new(
            hash.to_string(),
            target.to_string(),
            Utc::now(),
            ShortUrlProperties::default(),
        )
    }

    #[tokio::test]
    async fn test_save_then_find() {
        let repo = InMemoryShortUrlRepository::new();
        repo.save(short_url("abc123", "https://example.com"))
            .await
            .unwrap();

        let found = repo.find_by_hash("abc123").await.unwrap().unwrap();
        assert_eq!(found.target, "https://example.com");
        assert!(repo.find_by_hash("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_keeps_first_record() {
        let repo = InMemoryShortUrlRepository::new();
        repo.save(short_url("abc123", "https://first.example"))
            .await
            .unwrap();

        let stored = repo
            .save(short_url("abc123", "https://second.example"))
            .await
            .unwrap();

        assert_eq!(stored.target, "https://first.example");
    }

    #[tokio::test]
    async fn test_clicks_counted_per_hash() {
        let repo = InMemoryClickRepository::new();
        for hash in ["abc123", "abc123", "other"] {
            repo.save(Click::new(
                hash.to_string(),
                Utc::now(),
                ClickProperties::default(),
            ))
            .await
            .unwrap();
        }

        assert_eq!(repo.count_by_hash("abc123").await.unwrap(), 2);
        assert_eq!(repo.count_by_hash("missing").await.unwrap(), 0);
        assert_eq!(repo.all().await.len(), 3);
    }
}
