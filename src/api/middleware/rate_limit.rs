//! Per-IP rate limiting for the `/api` routes (token bucket).
//!
//! This guards request volume per client. The per-short-URL redirect ceiling
//! is a separate mechanism, see
//! [`crate::application::services::RedirectionLimitService`].

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Sustained requests per second per client.
const PER_SECOND: u64 = 2;
/// Requests a client may burst before being throttled.
const BURST_SIZE: u32 = 20;

type Layer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Keys clients by socket peer address. Requires `ConnectInfo<SocketAddr>`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> Layer<PeerIpKeyExtractor> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Keys clients by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, falling back
/// to the peer address. Use only behind a trusted reverse proxy.
pub fn proxied_layer() -> Layer<SmartIpKeyExtractor> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
