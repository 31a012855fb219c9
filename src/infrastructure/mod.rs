//! Infrastructure layer: concrete implementations of the domain traits.
//!
//! # Modules
//!
//! - [`cache`] - Redis and no-op target caches
//! - [`counters`] - In-memory redirect counters
//! - [`persistence`] - PostgreSQL and in-memory stores
//! - [`thirdparty`] - ipinfo, Safe Browsing and reachability HTTP clients

pub mod cache;
pub mod counters;
pub mod persistence;
pub mod thirdparty;
