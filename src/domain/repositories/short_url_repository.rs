//! Repository trait for short URL data access.

use crate::domain::entities::ShortUrl;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for [`ShortUrl`] records keyed by hash.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - Process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a short URL by its hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Stores a short URL unless its hash is already present.
    ///
    /// Returns the record that is stored under the hash afterwards, which is the
    /// existing one when the hash was taken.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, short_url: ShortUrl) -> Result<ShortUrl, AppError>;
}
