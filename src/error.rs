//! Application error type shared by every layer.
//!
//! Each variant maps to one HTTP status and a stable machine-readable code.
//! Responses are rendered as:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short URL not found", "details": { "hash": "abc123" } } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Submitted URL is blank, malformed or uses a disallowed scheme.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// Request input other than the URL is unusable (e.g. blank User-Agent).
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Redirect quota for a short URL is exhausted.
    #[error("{message}")]
    RateLimited { message: String, details: Value },

    /// URL was flagged by the threat-intelligence lookup.
    #[error("{message}")]
    UnsafeUrl { message: String, details: Value },

    /// URL did not answer the accessibility probe.
    #[error("{message}")]
    UnreachableUrl { message: String, details: Value },

    /// Hash already belongs to a different target.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// A third-party provider failed or timed out.
    #[error("{message}")]
    Upstream { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn rate_limited(message: impl Into<String>, details: Value) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
        }
    }
    pub fn unsafe_url(message: impl Into<String>, details: Value) -> Self {
        Self::UnsafeUrl {
            message: message.into(),
            details,
        }
    }
    pub fn unreachable_url(message: impl Into<String>, details: Value) -> Self {
        Self::UnreachableUrl {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status the error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidInput { .. }
            | AppError::UnreachableUrl { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::UnsafeUrl { .. } => StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::NotFound { .. } => "not_found",
            AppError::RateLimited { .. } => "rate_limited",
            AppError::UnsafeUrl { .. } => "unsafe_url",
            AppError::UnreachableUrl { .. } => "unreachable_url",
            AppError::Conflict { .. } => "conflict",
            AppError::Upstream { .. } => "upstream_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    fn details(&self) -> &Value {
        match self {
            AppError::InvalidUrl { details, .. }
            | AppError::InvalidInput { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::RateLimited { details, .. }
            | AppError::UnsafeUrl { details, .. }
            | AppError::UnreachableUrl { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::Upstream { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::invalid_input("Request validation failed", details)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    if matches!(e, sqlx::Error::PoolTimedOut) {
        return AppError::internal("Database pool timed out", json!({}));
    }

    AppError::internal("Database error", json!({ "reason": e.to_string() }))
}
