//! Storage for short URLs and clicks.
//!
//! - [`PgShortUrlRepository`] / [`PgClickRepository`] - PostgreSQL via SQLx
//! - [`InMemoryShortUrlRepository`] / [`InMemoryClickRepository`] - used when
//!   no database is configured, and in tests

pub mod in_memory;
pub mod pg_click_repository;
pub mod pg_short_url_repository;

pub use in_memory::{InMemoryClickRepository, InMemoryShortUrlRepository};
pub use pg_click_repository::PgClickRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
