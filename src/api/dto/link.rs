//! DTOs for `POST /api/link`.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `application/x-www-form-urlencoded` body.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkForm {
    /// Scheme and format are checked by the URL checks, not here.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    #[validate(length(max = 255, message = "Sponsor must be at most 255 characters"))]
    pub sponsor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    /// Full short URL, also sent as `Location`.
    pub url: String,
    pub properties: LinkProperties,
    /// Base64 PNG of a QR code encoding `url`.
    pub qr_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkProperties {
    pub safe: bool,
}
