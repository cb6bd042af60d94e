//! Gateway configuration

use pac_core::Endpoints;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listen port (the PORT environment variable overrides it)
    pub port: u16,
    /// Forward-proxy endpoint hostnames
    pub endpoints: Endpoints,
    /// Template file to serve; the bundled template when unset
    pub template_path: Option<PathBuf>,
    /// Directory holding published CA certificates
    pub cert_dir: PathBuf,
    /// Certificate filenames that may be served from the cert directory
    pub published_certs: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            endpoints: Endpoints::default(),
            template_path: None,
            cert_dir: "/etc/opensase/certs".into(),
            published_certs: vec!["opensase-forward-proxy-ca.crt".into()],
        }
    }
}

impl GatewayConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
