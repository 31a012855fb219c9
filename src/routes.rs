//! Top-level router.
//!
//! # Route Structure
//!
//! - `GET  /{id}`            - Short URL redirect
//! - `GET  /health`          - Storage and cache status
//! - `POST /api/link`        - Shorten one URL
//! - `POST /api/upload-csv`  - Shorten a CSV of URLs
//!
//! # Middleware
//!
//! - **Tracing** - Span per request with status and latency
//! - **Rate limiting** - Per-IP token bucket on `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes without the `/api` rate limiter.
///
/// The governor layer needs the peer address of every request, which in-process
/// test clients do not provide; [`app_router`] adds it on top.
pub fn routes(state: AppState) -> Router {
    routes_with(state, api::routes::api_routes())
}

/// Full application router.
///
/// With `behind_proxy`, the rate limiter keys on forwarded client addresses
/// instead of the socket peer.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = if state.behind_proxy {
        api::routes::api_routes().layer(rate_limit::proxied_layer())
    } else {
        api::routes::api_routes().layer(rate_limit::layer())
    };

    NormalizePathLayer::trim_trailing_slash().layer(routes_with(state, api_router))
}

fn routes_with(state: AppState, api_router: Router<AppState>) -> Router {
    Router::new()
        .route("/{id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
