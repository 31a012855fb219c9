//! Pre-creation checks for submitted URLs.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::gateways::{UrlReachabilityService, UrlSafetyService};
use crate::error::AppError;
use crate::utils::url_validator::validate_url;

/// Runs syntactic validation, the reachability probe and the safety lookup,
/// in that order, stopping at the first failure.
pub struct UrlCheckService {
    reachability: Arc<dyn UrlReachabilityService>,
    safety: Arc<dyn UrlSafetyService>,
}

impl UrlCheckService {
    pub fn new(
        reachability: Arc<dyn UrlReachabilityService>,
        safety: Arc<dyn UrlSafetyService>,
    ) -> Self {
        Self {
            reachability,
            safety,
        }
    }

    /// Checks that `url` may be shortened.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - malformed or disallowed URL (no network call made)
    /// - [`AppError::UnreachableUrl`] - the probe failed
    /// - [`AppError::UnsafeUrl`] - flagged by the threat lookup
    /// - [`AppError::Upstream`] - the threat lookup itself failed
    pub async fn check(&self, url: &str) -> Result<(), AppError> {
        validate_url(url).map_err(|e| AppError::invalid_url(e.to_string(), json!({ "url": url })))?;

        if !self.reachability.is_reachable(url).await {
            debug!(url, "URL not reachable");
            return Err(AppError::unreachable_url(
                "URL is not reachable",
                json!({ "url": url }),
            ));
        }

        if !self.safety.is_safe(url).await? {
            debug!(url, "URL flagged as unsafe");
            return Err(AppError::unsafe_url("URL is not safe", json!({ "url": url })));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::{MockUrlReachabilityService, MockUrlSafetyService};

    fn service(reachable: bool, safe: Result<bool, ()>) -> UrlCheckService {
        let mut reachability = MockUrlReachabilityService::new();
        reachability
            .expect_is_reachable()
            .returning(move |_| reachable);

        let mut safety = MockUrlSafetyService::new();
        safety.expect_is_safe().returning(move |_| {
            safe.map_err(|_| AppError::upstream("Safe Browsing request failed", json!({})))
        });

        UrlCheckService::new(Arc::new(reachability), Arc::new(safety))
    }

    #[tokio::test]
    async fn test_check_passes() {
        let service = service(true, Ok(true));
        assert!(service.check("https://example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_skips_network_checks() {
        let mut reachability = MockUrlReachabilityService::new();
        reachability.expect_is_reachable().times(0);
        let mut safety = MockUrlSafetyService::new();
        safety.expect_is_safe().times(0);

        let service = UrlCheckService::new(Arc::new(reachability), Arc::new(safety));
        let result = service.check("ftp://example.com").await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_unreachable() {
        let service = service(false, Ok(true));
        let result = service.check("https://example.com").await;

        assert!(matches!(result.unwrap_err(), AppError::UnreachableUrl { .. }));
    }

    #[tokio::test]
    async fn test_unsafe() {
        let service = service(true, Ok(false));
        let result = service.check("https://example.com").await;

        assert!(matches!(result.unwrap_err(), AppError::UnsafeUrl { .. }));
    }

    #[tokio::test]
    async fn test_safety_failure_is_not_treated_as_safe() {
        let service = service(true, Err(()));
        let result = service.check("https://example.com").await;

        assert!(matches!(result.unwrap_err(), AppError::Upstream { .. }));
    }
}
