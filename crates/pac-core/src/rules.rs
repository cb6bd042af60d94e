//! Bypass rules and the routing decision
//!
//! The generated script classifies every outbound URL with two fixed,
//! ordered lists: hostname substrings that mark CDN/static hosts, and
//! static-asset URL suffixes. Both only ever produce DIRECT, so ordering
//! is a short-circuit optimization, never a correctness concern. This
//! module is the server-side rendition of that logic; the same lists are
//! embedded in the script template, and a test keeps the two in sync.

use serde::Serialize;

/// Hostname substrings that typically indicate CDNs or static content
pub const BYPASS_HOST_PATTERNS: &[&str] = &[
    "cdn", "static", "assets", "images", "img", "media", "fonts", "js", "css", "videos",
    "akamai", "akamaized", "cloudfront", "fastly", "netdna", "stackpath", "cachefly",
    "gstatic", "fbcdn", "azureedge", "cloudflare",
];

/// URL suffixes for common static assets
pub const STATIC_EXTENSIONS: &[&str] = &[
    ".js", ".css", ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".ico",
    ".woff", ".woff2", ".ttf", ".eot", ".otf", ".mp4", ".webm", ".m4v",
];

/// Port the forward-proxy endpoint accepts tunneled connections on
pub const PROXY_PORT: u16 = 8080;

/// Outcome of classifying one outbound URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteDecision {
    /// Bypass the proxy entirely
    Direct,
    /// Tunnel through the forward proxy
    Proxy,
}

/// The fixed bypass rule lists
#[derive(Debug, Clone)]
pub struct RuleSet {
    host_patterns: &'static [&'static str],
    extensions: &'static [&'static str],
}

impl RuleSet {
    /// Rule set shipped with the service
    pub fn builtin() -> Self {
        Self {
            host_patterns: BYPASS_HOST_PATTERNS,
            extensions: STATIC_EXTENSIONS,
        }
    }

    /// Classify one outbound request.
    ///
    /// Total over all inputs: empty host and url match nothing and fall
    /// through to [`RouteDecision::Proxy`]. A hostname match short-circuits
    /// before the extension list is consulted.
    pub fn decide(&self, host: &str, url: &str) -> RouteDecision {
        let host = host.to_ascii_lowercase();
        for pattern in self.host_patterns {
            if host.contains(pattern) {
                return RouteDecision::Direct;
            }
        }

        let url = url.to_ascii_lowercase();
        for extension in self.extensions {
            if url.ends_with(extension) {
                return RouteDecision::Direct;
            }
        }

        RouteDecision::Proxy
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Proxy directive the script returns for non-bypassed traffic. The
/// identity rides in the endpoint subdomain so the proxy can attribute
/// the connection to a tenant and, when pinned, a session.
pub fn proxy_directive(identity: &str, endpoint: &str) -> String {
    format!("PROXY {identity}.{endpoint}:{PROXY_PORT}")
}
