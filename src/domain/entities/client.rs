//! Per-request caller metadata.

use std::net::IpAddr;

/// Country reported for non-routable / reserved addresses.
pub const BOGON_COUNTRY: &str = "Bogon";

/// Result of a geolocation lookup. Never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLocation {
    pub ip: String,
    pub country: String,
}

impl GeoLocation {
    pub fn new(ip: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            country: country.into(),
        }
    }

    pub fn bogon(ip: impl Into<String>) -> Self {
        Self::new(ip, BOGON_COUNTRY)
    }

    pub fn is_bogon(&self) -> bool {
        self.country == BOGON_COUNTRY
    }
}

/// Browser and operating system families parsed from a User-Agent header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserPlatform {
    pub browser: String,
    pub platform: String,
}

/// What the redirect pipeline needs to know about the incoming request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub ip: IpAddr,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl RequestContext {
    pub fn new(ip: IpAddr, user_agent: Option<&str>, referrer: Option<&str>) -> Self {
        Self {
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referrer: referrer.map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bogon_location() {
        let location = GeoLocation::bogon("10.0.0.1");
        assert_eq!(location.country, "Bogon");
        assert!(location.is_bogon());
    }

    #[test]
    fn test_request_context_creation() {
        let context = RequestContext::new(
            "203.0.113.7".parse().unwrap(),
            Some("Mozilla/5.0"),
            None,
        );

        assert_eq!(context.ip.to_string(), "203.0.113.7");
        assert_eq!(context.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert!(context.referrer.is_none());
    }
}
