//! Core domain entities.
//!
//! - [`ShortUrl`] - Mapping from a hash to its target URL
//! - [`Redirection`] - Resolved target plus HTTP redirect status
//! - [`Click`] - One logged redirect
//! - [`GeoLocation`], [`BrowserPlatform`] - Per-request caller metadata

pub mod click;
pub mod client;
pub mod short_url;

pub use click::{Click, ClickProperties};
pub use client::{BOGON_COUNTRY, BrowserPlatform, GeoLocation, RequestContext};
pub use short_url::{Redirection, ShortUrl, ShortUrlProperties};
