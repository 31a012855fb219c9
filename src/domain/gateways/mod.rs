//! Contracts for the collaborators the use cases call out to.
//!
//! - [`HashService`] - Derives the short identifier of a URL
//! - [`GeoLocationService`] - Resolves a caller address to a country
//! - [`UrlSafetyService`] - Threat-intelligence lookup for a URL
//! - [`UrlReachabilityService`] - Accessibility probe for a URL
//!
//! Concrete implementations live in `crate::utils::hash` and
//! `crate::infrastructure::thirdparty`.

use crate::domain::entities::GeoLocation;
use crate::error::AppError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Deterministic, URL-path-safe identifier derivation.
#[cfg_attr(test, mockall::automock)]
pub trait HashService: Send + Sync {
    fn hash(&self, url: &str) -> String;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocationService: Send + Sync {
    /// Looks up the country of `ip`. Reserved ranges yield country `"Bogon"`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the provider fails or times out.
    async fn get(&self, ip: IpAddr) -> Result<GeoLocation, AppError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlSafetyService: Send + Sync {
    /// Returns `false` when the URL matches a known threat.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the lookup cannot be completed.
    /// Callers must not treat that as safe.
    async fn is_safe(&self, url: &str) -> Result<bool, AppError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlReachabilityService: Send + Sync {
    /// Returns `true` when the URL answers with a non-error status in time.
    async fn is_reachable(&self, url: &str) -> bool;
}
