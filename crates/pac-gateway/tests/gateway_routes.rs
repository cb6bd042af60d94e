//! End-to-end route tests against the real router

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use pac_core::{Endpoints, RuleSet, ScriptTemplate, Specializer};
use pac_gateway::config::GatewayConfig;
use pac_gateway::{build_router, GatewayState};
use serde_json::Value;

const TENANT: &str = "beee99f9-ff92-4b15-bddd-652c8204f79f";

fn server() -> TestServer {
    let template = ScriptTemplate::bundled().unwrap();
    let specializer = Specializer::new(template, Endpoints::default()).unwrap();
    let state = GatewayState {
        specializer,
        rules: RuleSet::builtin(),
        config: GatewayConfig::default(),
    };
    TestServer::new(build_router(state)).unwrap()
}

/// The one active tenant declaration of a served script
fn tenant_decl(script: &str) -> String {
    script
        .lines()
        .find(|l| l.trim_start().starts_with("var tenantId"))
        .expect("script has a tenant declaration")
        .trim()
        .to_string()
}

#[tokio::test]
async fn health_reports_healthy() {
    let server = server();
    let res = server.get("/health").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn landing_page_documents_the_url_format() {
    let server = server();
    let res = server.get("/").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert!(res.text().contains("12345678-1234-1234-1234-123456789012"));
}

#[tokio::test]
async fn tenant_pac_embeds_tenant_verbatim() {
    let server = server();
    let res = server.get(&format!("/{TENANT}")).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(
        res.header(header::CONTENT_TYPE),
        "application/x-ns-proxy-autoconfig"
    );
    assert_eq!(
        tenant_decl(&res.text()),
        format!(r#"var tenantId = "{TENANT}";"#)
    );
}

#[tokio::test]
async fn tenant_pac_is_never_cached() {
    let server = server();
    let res = server.get(&format!("/{TENANT}")).await;
    assert_eq!(
        res.header(header::CACHE_CONTROL),
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(
        res.header(header::CONTENT_DISPOSITION),
        format!("attachment; filename=\"proxy-{TENANT}.pac\"").as_str()
    );
}

#[tokio::test]
async fn invalid_tenant_is_rejected() {
    let server = server();
    let res = server.get("/invalid-guid").await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Invalid tenant ID format"));
}

#[tokio::test]
async fn beta_edge_selects_the_beta_endpoint() {
    let server = server();
    let res = server
        .get(&format!("/{TENANT}"))
        .add_query_param("betaEdge", "true")
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert!(res
        .text()
        .contains(r#"var efpEndpoint = "efp-beta.opensase.io";"#));
}

#[tokio::test]
async fn beta_edge_false_keeps_the_stable_endpoint() {
    let server = server();
    let res = server
        .get(&format!("/{TENANT}"))
        .add_query_param("betaEdge", "false")
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert!(res
        .text()
        .contains(r#"var efpEndpoint = "efp.opensase.io";"#));
}

#[tokio::test]
async fn request_host_is_embedded_as_received() {
    let server = server();
    let res = server
        .get(&format!("/{TENANT}"))
        .add_header(
            header::HOST,
            HeaderValue::from_static("pac.test.opensase.io"),
        )
        .await;
    assert!(res
        .text()
        .contains(r#"var pacFileRequestHost = "pac.test.opensase.io";"#));
}

#[tokio::test]
async fn commented_declarations_survive_specialization() {
    let server = server();
    let res = server.get(&format!("/{TENANT}")).await;
    assert!(res
        .text()
        .contains(r#"//var tenantId = "0fb503dd-0009-4a41-a10e-ab12c5d01fa2";"#));
}

#[tokio::test]
async fn pinned_session_appends_a_pin() {
    let server = server();
    let res = server.get(&format!("/{TENANT}/pinnedsession")).await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let decl = tenant_decl(&res.text());
    let prefix = format!(r#"var tenantId = "{TENANT}_"#);
    assert!(decl.starts_with(&prefix), "unexpected declaration: {decl}");
    let pin = decl
        .strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix(r#"";"#))
        .expect("pinned declaration shape");
    assert_eq!(pin.len(), 12);
    assert!(pin
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
}

#[tokio::test]
async fn pinned_session_is_cacheable() {
    let server = server();
    let res = server.get(&format!("/{TENANT}/pinnedsession")).await;
    assert_eq!(res.header(header::CACHE_CONTROL), "public, max-age=43200");
    assert_eq!(res.header(header::ETAG), "pac-v1");
    assert_eq!(
        res.header(header::CONTENT_DISPOSITION),
        format!("attachment; filename=\"proxy-{TENANT}-pinned.pac\"").as_str()
    );
}

#[tokio::test]
async fn successive_pinned_sessions_differ() {
    let server = server();
    let first = server.get(&format!("/{TENANT}/pinnedsession")).await;
    let second = server.get(&format!("/{TENANT}/pinnedsession")).await;
    assert_ne!(tenant_decl(&first.text()), tenant_decl(&second.text()));
}

#[tokio::test]
async fn route_check_bypasses_cdn_hosts() {
    let server = server();
    let res = server
        .get(&format!("/{TENANT}/routecheck"))
        .add_query_param("url", "https://cdn.example.com/app.js")
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["directive"], "DIRECT");
}

#[tokio::test]
async fn route_check_proxies_unmatched_traffic() {
    let server = server();
    let res = server
        .get(&format!("/{TENANT}/routecheck"))
        .add_query_param("url", "https://internal.example.com/report.pdf")
        .await;
    let body: Value = res.json();
    assert_eq!(
        body["directive"],
        format!("PROXY {TENANT}.efp.opensase.io:8080")
    );
}

#[tokio::test]
async fn route_check_requires_a_url() {
    let server = server();
    let res = server.get(&format!("/{TENANT}/routecheck")).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Missing required query parameter"));
}

#[tokio::test]
async fn unknown_certificate_is_not_found() {
    let server = server();
    let res = server.get("/certs/not-published.crt").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["error"], "Certificate file not found");
}
