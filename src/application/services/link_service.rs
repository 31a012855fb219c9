//! Short URL creation service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{ShortUrl, ShortUrlProperties};
use crate::domain::gateways::HashService;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_url;

/// Service for creating short URLs.
///
/// Validates the target, derives its hash and stores the record. Creating the
/// same URL twice returns the record stored the first time.
pub struct LinkService {
    short_url_repository: Arc<dyn ShortUrlRepository>,
    hash_service: Arc<dyn HashService>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix of short links; a trailing `/` is dropped.
    pub fn new(
        short_url_repository: Arc<dyn ShortUrlRepository>,
        hash_service: Arc<dyn HashService>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            short_url_repository,
            hash_service,
            base_url,
        }
    }

    /// Creates (or returns the existing) short URL for `url`.
    ///
    /// # Hash Collisions
    ///
    /// If the derived hash is already stored for a different target the call
    /// fails instead of overwriting the existing mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the URL fails syntactic validation.
    /// Returns [`AppError::Conflict`] if the hash belongs to another target.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create(
        &self,
        url: &str,
        properties: ShortUrlProperties,
    ) -> Result<ShortUrl, AppError> {
        validate_url(url).map_err(|e| AppError::invalid_url(e.to_string(), json!({ "url": url })))?;

        let hash = self.hash_service.hash(url);

        if let Some(existing) = self.short_url_repository.find_by_hash(&hash).await? {
            return self.reuse_existing(existing, url);
        }

        let short_url = ShortUrl::new(hash, url.to_string(), Utc::now(), properties);
        let saved = self.short_url_repository.save(short_url).await?;

        // A concurrent create may have won the insert.
        if saved.target != url {
            return Err(collision(&saved, url));
        }

        metrics::counter!("short_urls_created_total").increment(1);
        info!(hash = %saved.hash, "Short URL created");

        Ok(saved)
    }

    /// Full public short URL for a hash.
    pub fn short_url(&self, hash: &str) -> String {
        format!("{}/{}", self.base_url, hash)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn reuse_existing(&self, existing: ShortUrl, url: &str) -> Result<ShortUrl, AppError> {
        if existing.target == url {
            debug!(hash = %existing.hash, "Short URL already exists");
            Ok(existing)
        } else {
            Err(collision(&existing, url))
        }
    }
}

fn collision(existing: &ShortUrl, url: &str) -> AppError {
    warn!(hash = %existing.hash, "Hash collision between distinct targets");
    AppError::conflict(
        "Hash already assigned to a different URL",
        json!({ "hash": existing.hash, "url": url }),
    )
}
