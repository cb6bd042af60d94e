//! PAC Delivery Gateway - Main Entry Point

use pac_core::{RuleSet, ScriptTemplate, Specializer};
use pac_gateway::config::GatewayConfig;
use pac_gateway::{build_router, GatewayState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("PAC gateway v{}", env!("CARGO_PKG_VERSION"));

    // Load config
    let config_path = std::env::var("CONFIG_PATH")
        .unwrap_or_else(|_| "/etc/opensase/pac-gateway.json".into());

    let config = GatewayConfig::load(&config_path).unwrap_or_else(|_| {
        tracing::warn!("Config not found, using defaults");
        GatewayConfig::default()
    });

    // A structurally broken template fails every request identically, so
    // refuse to start instead of serving guaranteed failures.
    let template = match &config.template_path {
        Some(path) => ScriptTemplate::parse(&std::fs::read_to_string(path)?)?,
        None => ScriptTemplate::bundled()?,
    };
    let specializer = Specializer::new(template, config.endpoints.clone())?;

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.port);

    let state = GatewayState {
        specializer,
        rules: RuleSet::builtin(),
        config,
    };
    let app = build_router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("PAC gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
