//! Domain layer containing business entities and collaborator contracts.
//!
//! Nothing in here knows about HTTP, PostgreSQL or third-party APIs.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage contracts (short URLs, clicks, redirect counters)
//! - [`gateways`] - Contracts for hashing and the third-party lookups
//!
//! # Redirect Flow
//!
//! 1. HTTP handler builds a [`entities::RequestContext`] from the request
//! 2. [`crate::application::services::RedirectService`] enforces the redirect limit
//! 3. Caller is geolocated and its User-Agent parsed
//! 4. The [`entities::ShortUrl`] is resolved and a [`entities::Click`] persisted
//!    via [`repositories::ClickRepository`] before the redirect is returned

pub mod entities;
pub mod gateways;
pub mod repositories;
