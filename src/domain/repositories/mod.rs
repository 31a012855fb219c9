//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence` and
//!   `crate::infrastructure::counters`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ShortUrlRepository`] - Short URL lookup and insert-if-absent
//! - [`ClickRepository`] - Append-only click log
//! - [`RedirectionCountRepository`] - Volatile per-hash redirect counters

pub mod click_repository;
pub mod redirection_count_repository;
pub mod short_url_repository;

pub use click_repository::ClickRepository;
pub use redirection_count_repository::RedirectionCountRepository;
pub use short_url_repository::ShortUrlRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use redirection_count_repository::MockRedirectionCountRepository;
#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
