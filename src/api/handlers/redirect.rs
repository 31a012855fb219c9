//! Handler for short URL redirects.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::domain::entities::RequestContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;

/// `GET /{id}`
///
/// Logs the click and answers `307 Temporary Redirect` with the target in
/// `Location`. See [`crate::application::services::RedirectService`] for the
/// pipeline and its error responses.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let ip = extract_client_ip(&headers, addr.ip(), state.behind_proxy);
    let context = RequestContext::new(
        ip,
        header_str(&headers, header::USER_AGENT),
        header_str(&headers, header::REFERER),
    );

    let redirection = state.redirect_service.redirect(&id, &context).await?;

    let status =
        StatusCode::from_u16(redirection.mode).unwrap_or(StatusCode::TEMPORARY_REDIRECT);

    Ok((status, [(header::LOCATION, redirection.target)]).into_response())
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
