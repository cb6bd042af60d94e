//! PAC Delivery Gateway
//!
//! Thin HTTP shell around `pac-core`: it owns routing, status codes,
//! headers, and caching policy; the script content itself comes entirely
//! from the core. Endpoints:
//!
//! - `GET /` - setup instructions
//! - `GET /health` - liveness
//! - `GET /certs/:name` - published proxy CA certificates
//! - `GET /:tenant_id` - tenant PAC file (`?betaEdge=true` for the beta endpoint)
//! - `GET /:tenant_id/pinnedsession` - tenant PAC file with a fresh session pin
//! - `GET /:tenant_id/routecheck?url=...` - server-side routing dry run

pub mod config;
pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use config::GatewayConfig;
use pac_core::{RuleSet, Specializer};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared router state: one immutable specializer for every request
pub struct GatewayState {
    /// Template bound to the configured endpoints
    pub specializer: Specializer,
    /// Server-side rendition of the script's bypass rules
    pub rules: RuleSet,
    /// Gateway configuration
    pub config: GatewayConfig,
}

/// Build the gateway router
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(routes::landing::landing))
        .route("/health", get(routes::health::health_check))
        .route("/certs/:name", get(routes::certs::serve_cert))
        .route("/:tenant_id", get(routes::pac::tenant_pac))
        .route("/:tenant_id/pinnedsession", get(routes::pac::pinned_pac))
        .route("/:tenant_id/routecheck", get(routes::pac::route_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}
