//! Error type returned by request handlers.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use stockq_data::ProviderError;
use stockq_domain::DomainError;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to API clients.
///
/// Each variant maps to one HTTP status; the body is always
/// `{"error": <message>, "code": <status>}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Provider has no data for the symbol.
    #[error("Invalid symbol: {0}")]
    SymbolNotFound(String),
    /// Malformed symbol, period, interval or indicator window.
    #[error("{0}")]
    BadRequest(String),
    /// Well-formed body of the wrong shape.
    #[error("{0}")]
    Unprocessable(String),
    /// Provider call failed.
    #[error("Upstream provider unavailable: {0}")]
    UpstreamUnavailable(String),
    /// Provider call exceeded its timeout.
    #[error("Upstream provider timed out")]
    UpstreamTimeout,
    /// Unexpected server-side failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SymbolNotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "code": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::SymbolNotFound(symbol) => Self::SymbolNotFound(symbol),
            ProviderError::Timeout => Self::UpstreamTimeout,
            other => Self::UpstreamUnavailable(other.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => Self::Unprocessable(e.body_text()),
            other => Self::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
