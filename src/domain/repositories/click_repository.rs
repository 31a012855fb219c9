//! Repository trait for the click log.

use crate::domain::entities::Click;
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only storage for [`Click`] events.
///
/// A successful `save` means the click is durable; the redirect is only
/// returned to the caller afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Persists a click and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, click: Click) -> Result<Click, AppError>;

    /// Number of clicks logged for a hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_by_hash(&self, hash: &str) -> Result<u64, AppError>;
}
