//! Published CA certificate delivery
//!
//! Clients trusting the forward proxy for TLS inspection fetch its root
//! certificate from here. Only filenames on the published list are
//! servable; everything else is a 404 regardless of what is on disk.

use crate::error::ApiError;
use crate::GatewayState;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

pub async fn serve_cert(
    State(state): State<Arc<GatewayState>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    if !state.config.published_certs.iter().any(|c| c == &name) {
        return Err(ApiError::CertNotFound);
    }

    let path = state.config.cert_dir.join(&name);
    let content = match tokio::fs::read(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::CertNotFound);
        }
        Err(e) => {
            tracing::error!(error = %e, cert = %name, "failed to read certificate");
            return Err(ApiError::CertRead);
        }
    };

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/x-x509-ca-cert".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{name}\""),
            ),
            (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
        ],
        content,
    )
        .into_response())
}
