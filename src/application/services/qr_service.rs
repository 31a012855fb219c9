//! QR code rendering.

use std::io::Cursor;

use base64::Engine as _;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use serde_json::json;

use crate::error::AppError;

/// Default width and height of rendered codes in pixels.
pub const DEFAULT_QR_SIZE: u32 = 256;

/// Renders text as a square PNG QR code.
pub struct QrService {
    size: u32,
}

impl QrService {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Encodes `text` as PNG bytes at least `size` × `size` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the text does not fit in a QR code
    /// or PNG encoding fails.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, AppError> {
        let code = QrCode::new(text.as_bytes()).map_err(|e| {
            AppError::internal("QR generation failed", json!({ "reason": e.to_string() }))
        })?;

        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.size, self.size)
            .build();

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| {
                AppError::internal("PNG encoding failed", json!({ "reason": e.to_string() }))
            })?;

        Ok(bytes)
    }

    /// Same as [`Self::encode`], base64 encoded for JSON bodies.
    pub fn encode_base64(&self, text: &str) -> Result<String, AppError> {
        self.encode(text)
            .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}

impl Default for QrService {
    fn default() -> Self {
        Self::new(DEFAULT_QR_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_produces_png() {
        let service = QrService::default();
        let bytes = service.encode("http://localhost:8080/abc123").unwrap();

        assert!(bytes.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn test_encode_respects_minimum_size() {
        let service = QrService::new(300);
        let bytes = service.encode("http://localhost:8080/abc123").unwrap();

        let image = image::load_from_memory(&bytes).unwrap();
        assert!(image.width() >= 300);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn test_encode_base64_decodes_to_png() {
        let service = QrService::default();
        let encoded = service.encode_base64("https://example.com").unwrap();

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert!(decoded.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn test_encode_too_long_fails() {
        let service = QrService::default();
        let result = service.encode(&"x".repeat(10_000));

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }
}
