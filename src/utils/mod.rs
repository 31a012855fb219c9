//! Utility functions shared across layers.
//!
//! - [`url_validator`] - Syntactic URL validation
//! - [`hash`] - Deterministic short identifier derivation
//! - [`client_ip`] - Caller address extraction from HTTP requests

pub mod client_ip;
pub mod hash;
pub mod url_validator;
