use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::gateways::UrlReachabilityService;

/// A URL is reachable when a GET (following redirects) ends in a 2xx response.
pub struct HttpReachabilityService {
    client: Client,
}

impl HttpReachabilityService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UrlReachabilityService for HttpReachabilityService {
    async fn is_reachable(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(url, status = response.status().as_u16(), "Probe failed");
                false
            }
            Err(e) => {
                debug!(url, "Probe failed: {}", e);
                false
            }
        }
    }
}
