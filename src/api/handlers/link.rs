//! Handler for single short URL creation.

use axum::{
    Form, Json,
    extract::{ConnectInfo, State, rejection::FormRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use std::net::SocketAddr;
use tracing::info;
use validator::Validate;

use crate::api::dto::link::{LinkForm, LinkProperties, LinkResponse};
use crate::domain::entities::ShortUrlProperties;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;

/// Shortens one URL.
///
/// # Endpoint
///
/// `POST /api/link` (form fields `url`, optional `sponsor`)
///
/// # Request Flow
///
/// 1. Syntactic validation, reachability probe, Safe Browsing lookup
/// 2. Geolocate the caller
/// 3. Create (or reuse) the short URL
/// 4. Render a QR code of the short URL
///
/// # Response
///
/// `201 Created`, `Location: <short url>`:
///
/// ```json
/// { "url": "http://localhost:8080/3f5a1c0d9e2b", "properties": { "safe": true }, "qrCode": "iVBORw0..." }
/// ```
///
/// # Errors
///
/// - 400 invalid or unreachable URL, malformed form
/// - 403 URL flagged as unsafe
/// - 409 hash already used by another URL
/// - 502 geolocation or Safe Browsing unavailable
pub async fn link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    form: Result<Form<LinkForm>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Form(form) = form.map_err(|e| {
        AppError::invalid_input("Invalid form body", json!({ "reason": e.body_text() }))
    })?;
    form.validate()?;

    state.url_check_service.check(&form.url).await?;

    let ip = extract_client_ip(&headers, addr.ip(), state.behind_proxy);
    let geo_location = state.geo_location.get(ip).await?;

    let short_url = state
        .link_service
        .create(
            &form.url,
            ShortUrlProperties {
                ip: Some(geo_location.ip),
                country: Some(geo_location.country),
                sponsor: form.sponsor.filter(|s| !s.trim().is_empty()),
                safe: true,
            },
        )
        .await?;

    let url = state.link_service.short_url(&short_url.hash);
    let qr_code = state.qr_service.encode_base64(&url)?;

    info!(hash = %short_url.hash, "Link issued");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, url.clone())],
        Json(LinkResponse {
            url,
            properties: LinkProperties {
                safe: short_url.properties.safe,
            },
            qr_code,
        }),
    ))
}
