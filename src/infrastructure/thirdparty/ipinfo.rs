use std::net::IpAddr;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::endpoint;
use crate::domain::entities::GeoLocation;
use crate::domain::gateways::GeoLocationService;
use crate::error::AppError;

/// Geolocation backed by `GET {base}/{ip}/json`.
pub struct IpInfoGeoLocationService {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    ip: String,
    country: Option<String>,
    #[serde(default)]
    bogon: bool,
}

impl IpInfoGeoLocationService {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token,
        }
    }
}

/// Addresses ipinfo would report as bogons and that never leave the host or LAN.
fn is_local(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
        }
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_local(IpAddr::V4(v4));
            }
            v6.is_loopback() || v6.is_unspecified() || v6.is_unique_local() || v6.is_unicast_link_local()
        }
    }
}

fn to_location(response: IpInfoResponse) -> Result<GeoLocation, AppError> {
    if response.bogon {
        return Ok(GeoLocation::bogon(response.ip));
    }

    match response.country {
        Some(country) if !country.is_empty() => Ok(GeoLocation::new(response.ip, country)),
        _ => Err(AppError::upstream(
            "Geolocation response has no country",
            json!({ "ip": response.ip }),
        )),
    }
}

#[async_trait]
impl GeoLocationService for IpInfoGeoLocationService {
    async fn get(&self, ip: IpAddr) -> Result<GeoLocation, AppError> {
        if is_local(ip) {
            debug!(%ip, "Local address, skipping geolocation lookup");
            return Ok(GeoLocation::bogon(ip.to_string()));
        }

        let mut request = self.client.get(endpoint(&self.base_url, &format!("{}/json", ip)));
        if let Some(ref token) = self.token {
            request = request.query(&[("token", token)]);
        }

        let response = request.send().await.map_err(|e| {
            AppError::upstream("Geolocation request failed", json!({ "reason": e.to_string() }))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                "Geolocation service returned an error",
                json!({ "status": status.as_u16() }),
            ));
        }

        let body: IpInfoResponse = response.json().await.map_err(|e| {
            AppError::upstream("Malformed geolocation response", json!({ "reason": e.to_string() }))
        })?;

        to_location(body)
    }
}
