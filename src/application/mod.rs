//! Application layer services implementing the use cases.
//!
//! Services orchestrate domain contracts (repositories and gateways) and are
//! constructed with their collaborators passed in explicitly.
//!
//! # Available Services
//!
//! - [`services::LinkService`] - Short URL creation
//! - [`services::RedirectService`] - Redirect dispatch with click logging
//! - [`services::RedirectionLimitService`] - Per-hash redirect ceiling
//! - [`services::BatchService`] - Streaming CSV shortening
//! - [`services::UrlCheckService`] - Validation, reachability and safety pre-checks
//! - [`services::BrowserPlatformService`] - User-Agent parsing
//! - [`services::QrService`] - PNG QR code rendering

pub mod services;
