//! Tenant PAC endpoints
//!
//! The boundary for the specialization core: tenant ids are validated
//! here (the core trusts its inputs), the session pin is minted here,
//! and the cache policy differs by endpoint: an unpinned script must be
//! refetched freshly, a pinned one stays valid for its affinity window.

use crate::error::ApiError;
use crate::GatewayState;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Json, Response};
use pac_core::{proxy_directive, EndpointVariant, RouteDecision, SessionPin, TenantId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

const PAC_CONTENT_TYPE: &str = "application/x-ns-proxy-autoconfig";

#[derive(Debug, Deserialize)]
pub struct PacQuery {
    #[serde(rename = "betaEdge")]
    beta_edge: Option<String>,
    url: Option<String>,
}

impl PacQuery {
    // Only the literal `true` selects the beta endpoint.
    fn variant(&self) -> EndpointVariant {
        match self.beta_edge.as_deref() {
            Some("true") => EndpointVariant::Beta,
            _ => EndpointVariant::Stable,
        }
    }
}

fn request_host(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost")
}

/// Specialized PAC file for one tenant
pub async fn tenant_pac(
    State(state): State<Arc<GatewayState>>,
    Path(tenant_id): Path<String>,
    Query(query): Query<PacQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let tenant = TenantId::parse(&tenant_id)?;
    let script =
        state
            .specializer
            .specialize(&tenant, None, query.variant(), request_host(&headers));

    Ok((
        [
            (header::CONTENT_TYPE, PAC_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"proxy-{tenant}.pac\""),
            ),
            (
                header::CACHE_CONTROL,
                "no-cache, no-store, must-revalidate".to_string(),
            ),
            (header::PRAGMA, "no-cache".to_string()),
            (header::EXPIRES, "0".to_string()),
        ],
        script,
    )
        .into_response())
}

/// Specialized PAC file with a fresh session pin
pub async fn pinned_pac(
    State(state): State<Arc<GatewayState>>,
    Path(tenant_id): Path<String>,
    Query(query): Query<PacQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let tenant = TenantId::parse(&tenant_id)?;
    let pin = SessionPin::generate()?;
    let script = state.specializer.specialize(
        &tenant,
        Some(&pin),
        query.variant(),
        request_host(&headers),
    );

    Ok((
        [
            (header::CONTENT_TYPE, PAC_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"proxy-{tenant}-pinned.pac\""),
            ),
            (header::CACHE_CONTROL, "public, max-age=43200".to_string()),
            (header::ETAG, "pac-v1".to_string()),
        ],
        script,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct RouteCheckResponse {
    pub url: String,
    pub host: String,
    pub decision: RouteDecision,
    pub directive: String,
}

/// Server-side dry run of the script's routing decision for one URL
pub async fn route_check(
    State(state): State<Arc<GatewayState>>,
    Path(tenant_id): Path<String>,
    Query(query): Query<PacQuery>,
) -> Result<Json<RouteCheckResponse>, ApiError> {
    let tenant = TenantId::parse(&tenant_id)?;
    let target = query.url.as_deref().ok_or(ApiError::MissingUrl)?;
    let parsed = Url::parse(target).map_err(|_| ApiError::InvalidUrl)?;
    let host = parsed.host_str().ok_or(ApiError::InvalidUrl)?;

    let decision = state.rules.decide(host, target);
    let directive = match decision {
        RouteDecision::Direct => "DIRECT".to_string(),
        RouteDecision::Proxy => {
            let endpoints = state.specializer.endpoints();
            let endpoint = match query.variant() {
                EndpointVariant::Stable => &endpoints.stable,
                EndpointVariant::Beta => &endpoints.beta,
            };
            proxy_directive(tenant.as_str(), endpoint)
        }
    };

    Ok(Json(RouteCheckResponse {
        url: target.to_owned(),
        host: host.to_owned(),
        decision,
        directive,
    }))
}
