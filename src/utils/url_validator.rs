//! Syntactic URL validation.
//!
//! Only absolute `http`/`https` URLs with a host are accepted. No network
//! access happens here; reachability and safety are checked elsewhere.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be blank")]
    Blank,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Checks that `input` is a well-formed, permitted URL.
///
/// # Rules
///
/// 1. **Blank**: empty or whitespace-only input is rejected
/// 2. **Format**: must parse as an absolute URL
/// 3. **Protocol**: only HTTP and HTTPS are allowed
/// 4. **Host**: must be present and non-empty
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com/path").is_ok());
/// assert_eq!(validate_url("ftp://example.com"), Err(UrlValidationError::UnsupportedProtocol));
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Blank);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Boolean form of [`validate_url`].
pub fn is_valid(input: &str) -> bool {
    validate_url(input).is_ok()
}
