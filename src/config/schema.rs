//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the tenant edge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream application that receives forwarded requests.
    pub upstream: UpstreamConfig,

    /// Subdomain routing rules.
    pub routing: RoutingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000").
    pub address: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

/// Subdomain routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Canonical root domain, optionally with a port (e.g., "example.com").
    pub root_domain: String,

    /// Paths under this prefix are off limits to tenant subdomains.
    pub admin_prefix: String,

    /// Where tenants hitting the admin prefix are sent.
    pub admin_redirect: String,

    /// Tenant landing pages are served from `<namespace>/<subdomain>`.
    pub tenant_namespace: String,

    /// Path prefixes that bypass subdomain routing.
    pub excluded_prefixes: Vec<String>,

    /// Bypass top-level static files such as `/favicon.ico`.
    pub exclude_static_files: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            root_domain: "localhost:3000".to_string(),
            admin_prefix: "/admin".to_string(),
            admin_redirect: "/".to_string(),
            tenant_namespace: "/s".to_string(),
            excluded_prefixes: vec![
                "/api".to_string(),
                "/_next".to_string(),
                "/_vercel".to_string(),
            ],
            exclude_static_files: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json_logs: bool,

    /// Log every routing decision at debug level.
    pub log_decisions: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            // Per-request decision logs are a development aid only.
            log_decisions: cfg!(debug_assertions),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
