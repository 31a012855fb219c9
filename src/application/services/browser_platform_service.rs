//! User-Agent parsing.

use serde_json::json;
use woothee::parser::Parser;

use crate::domain::entities::BrowserPlatform;
use crate::error::AppError;

const UNKNOWN_BROWSER: &str = "Unknown Browser";
const UNKNOWN_PLATFORM: &str = "Unknown Platform";

/// Value woothee reports for fields it could not classify.
const WOOTHEE_UNKNOWN: &str = "UNKNOWN";

/// Identifies browser and platform families from a User-Agent header.
pub struct BrowserPlatformService {
    parser: Parser,
}

impl BrowserPlatformService {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Parses a User-Agent header value.
    ///
    /// Unrecognised agents yield `"Unknown Browser"` / `"Unknown Platform"`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the header is empty or blank.
    pub fn parse(&self, user_agent: &str) -> Result<BrowserPlatform, AppError> {
        if user_agent.trim().is_empty() {
            return Err(AppError::invalid_input(
                "User-Agent header is invalid",
                json!({ "header": "User-Agent" }),
            ));
        }

        let (browser, platform) = match self.parser.parse(user_agent) {
            Some(result) => (
                known_or(&result.name, UNKNOWN_BROWSER),
                known_or(&result.os, UNKNOWN_PLATFORM),
            ),
            None => (UNKNOWN_BROWSER.to_string(), UNKNOWN_PLATFORM.to_string()),
        };

        Ok(BrowserPlatform { browser, platform })
    }
}

impl Default for BrowserPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

fn known_or(value: &str, fallback: &str) -> String {
    if value.is_empty() || value == WOOTHEE_UNKNOWN {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
