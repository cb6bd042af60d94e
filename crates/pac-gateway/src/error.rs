//! Gateway error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use pac_core::PacError;
use serde::Serialize;
use thiserror::Error;

/// JSON body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure description
    pub error: String,
}

/// Request-level failures, rendered as JSON with a matching status code
#[derive(Debug, Error)]
pub enum ApiError {
    /// Tenant path parameter failed GUID validation
    #[error("Invalid tenant ID format. Must be a valid GUID.")]
    InvalidTenantId,

    /// Requested certificate is not published or not on disk
    #[error("Certificate file not found")]
    CertNotFound,

    /// Certificate exists but could not be read
    #[error("Internal server error while serving certificate file")]
    CertRead,

    /// PAC specialization failed (in practice: pin generation)
    #[error("Internal server error while generating PAC file")]
    PacGeneration,

    /// Route check called without its url parameter
    #[error("Missing required query parameter: url")]
    MissingUrl,

    /// Route check url parameter is not an absolute URL with a host
    #[error("Invalid url parameter")]
    InvalidUrl,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTenantId | Self::MissingUrl | Self::InvalidUrl => StatusCode::BAD_REQUEST,
            Self::CertNotFound => StatusCode::NOT_FOUND,
            Self::CertRead | Self::PacGeneration => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PacError> for ApiError {
    fn from(err: PacError) -> Self {
        match err {
            PacError::InvalidTenantId(_) => Self::InvalidTenantId,
            // Template faults are caught at startup; anything else that
            // leaks through a request is a generation failure.
            _ => Self::PacGeneration,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
