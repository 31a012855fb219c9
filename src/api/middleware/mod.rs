//! HTTP middleware: per-IP rate limiting and request tracing.

pub mod rate_limit;
pub mod tracing;
