//! Caller address extraction.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Resolves the address of the client that sent the request.
///
/// When `behind_proxy` is set, the left-most valid entry of `X-Forwarded-For`
/// wins, then `X-Real-IP`. Otherwise, or when neither header parses, the socket
/// peer address is used.
pub fn extract_client_ip(headers: &HeaderMap, peer: IpAddr, behind_proxy: bool) -> IpAddr {
    if !behind_proxy {
        return peer;
    }

    forwarded_for(headers)
        .or_else(|| real_ip(headers))
        .unwrap_or(peer)
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .find_map(|s| s.trim().parse::<IpAddr>().ok())
}

fn real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-real-ip")?
        .to_str()
        .ok()?
        .trim()
        .parse::<IpAddr>()
        .ok()
}
