//! Short identifier derivation.

use crate::domain::gateways::HashService;
use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Number of digest bytes kept before base64 encoding.
const HASH_LENGTH_BYTES: usize = 9;

/// SHA-256 based [`HashService`].
///
/// Keeps the first 72 bits of the digest and encodes them as URL-safe base64
/// without padding, producing a 12-character identifier. The same input always
/// yields the same identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256HashService;

impl Sha256HashService {
    pub fn new() -> Self {
        Self
    }
}

impl HashService for Sha256HashService {
    fn hash(&self, url: &str) -> String {
        let digest = Sha256::digest(url.as_bytes());
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&digest[..HASH_LENGTH_BYTES])
    }
}
