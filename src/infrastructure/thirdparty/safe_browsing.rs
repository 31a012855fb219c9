use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use super::endpoint;
use crate::domain::gateways::UrlSafetyService;
use crate::error::AppError;

const CLIENT_ID: &str = "url-shortener-redirect";
const THREAT_TYPES: [&str; 2] = ["MALWARE", "SOCIAL_ENGINEERING"];

/// Threat lookup via `POST {base}/v4/threatMatches:find?key=...`.
///
/// Any failure of the lookup is an error, never a "safe" verdict.
pub struct SafeBrowsingService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SafeBrowsingService {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

fn request_body(url: &str) -> Value {
    json!({
        "client": {
            "clientId": CLIENT_ID,
            "clientVersion": env!("CARGO_PKG_VERSION"),
        },
        "threatInfo": {
            "threatTypes": THREAT_TYPES,
            "platformTypes": ["ANY_PLATFORM"],
            "threatEntryTypes": ["URL"],
            "threatEntries": [{ "url": url }],
        }
    })
}

/// The API answers `{}` when nothing matched.
fn has_matches(response: &Value) -> bool {
    response
        .get("matches")
        .and_then(Value::as_array)
        .is_some_and(|matches| !matches.is_empty())
}

#[async_trait]
impl UrlSafetyService for SafeBrowsingService {
    async fn is_safe(&self, url: &str) -> Result<bool, AppError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "v4/threatMatches:find"))
            .query(&[("key", &self.api_key)])
            .json(&request_body(url))
            .send()
            .await
            .map_err(|e| {
                AppError::upstream("Safe Browsing request failed", json!({ "reason": e.to_string() }))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                "Safe Browsing returned an error",
                json!({ "status": status.as_u16() }),
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            AppError::upstream("Malformed Safe Browsing response", json!({ "reason": e.to_string() }))
        })?;

        let safe = !has_matches(&body);
        debug!(url, safe, "Safe Browsing verdict");
        Ok(safe)
    }
}
