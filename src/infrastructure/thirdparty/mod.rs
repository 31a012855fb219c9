//! HTTP clients for the external collaborators.
//!
//! - [`IpInfoGeoLocationService`] - ipinfo.io geolocation
//! - [`SafeBrowsingService`] - Google Safe Browsing v4 threat lookup
//! - [`HttpReachabilityService`] - GET probe of the submitted URL

mod ipinfo;
mod reachability;
mod safe_browsing;

pub use ipinfo::IpInfoGeoLocationService;
pub use reachability::HttpReachabilityService;
pub use safe_browsing::SafeBrowsingService;

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("url-shortener-redirect/", env!("CARGO_PKG_VERSION"));

/// Builds the shared client. Every request is bounded by `timeout`.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .context("failed to build HTTP client")
}

/// Joins `base` (with or without trailing `/`) and `path`.
fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
