//! Handler for CSV batch shortening.

use axum::{
    body::Body,
    extract::{ConnectInfo, Multipart, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use tracing::info;

use crate::application::services::BatchContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;

const FILE_FIELD: &str = "file";
const ATTACHMENT: &str = "attachment; filename=shortened_urls.csv";

/// Shortens every line of an uploaded file.
///
/// # Endpoint
///
/// `POST /api/upload-csv` (multipart, field `file`, one URL per line)
///
/// # Response
///
/// `200 OK`, `text/csv`, streamed as rows are produced:
///
/// ```text
/// original-url,shortened-url
/// https://example.com,http://localhost:8080/3f5a1c0d9e2b
/// not a url,ERROR: Invalid URL format: relative URL without a base
/// ```
///
/// Per-line failures become `ERROR:` rows. Only a missing file or a failed
/// geolocation of the uploader fail the request.
pub async fn upload_csv_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let content = read_file_field(&mut multipart).await?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    let ip = extract_client_ip(&headers, addr.ip(), state.behind_proxy);
    let geo_location = state.geo_location.get(ip).await?;

    info!(lines = lines.len(), "Processing CSV upload");

    let rows = state
        .batch_service
        .process(
            lines,
            BatchContext {
                ip: Some(geo_location.ip),
                country: Some(geo_location.country),
            },
        )
        .map(|row| Ok::<_, Infallible>(format!("{}\n", row)));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, ATTACHMENT),
        ],
        Body::from_stream(rows),
    )
        .into_response())
}

async fn read_file_field(multipart: &mut Multipart) -> Result<String, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::invalid_input("Invalid multipart body", json!({ "reason": e.body_text() }))
    })? {
        if field.name() == Some(FILE_FIELD) {
            return field.text().await.map_err(|e| {
                AppError::invalid_input("Unreadable file", json!({ "reason": e.body_text() }))
            });
        }
    }

    Err(AppError::invalid_input(
        "Missing file",
        json!({ "field": FILE_FIELD }),
    ))
}
