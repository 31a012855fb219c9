//! `/api` route table.

use axum::{Router, routing::post};

use crate::api::handlers::{link_handler, upload_csv_handler};
use crate::state::AppState;

/// # Endpoints
///
/// - `POST /link`       - Shorten one URL (form body)
/// - `POST /upload-csv` - Shorten a file of URLs (multipart, streamed CSV response)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(link_handler))
        .route("/upload-csv", post(upload_csv_handler))
}
