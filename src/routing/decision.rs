//! Routing decision for a (path, subdomain) pair.

use serde::Serialize;

pub const DEFAULT_ADMIN_PREFIX: &str = "/admin";
pub const DEFAULT_ADMIN_REDIRECT: &str = "/";
pub const DEFAULT_TENANT_NAMESPACE: &str = "/s";

/// What the edge should do with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "path", rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Forward unchanged.
    PassThrough,
    /// Client-visible redirect to a same-origin path.
    Redirect(String),
    /// Internal re-route; the client keeps its URL.
    Rewrite(String),
}

impl RoutingDecision {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RoutingDecision::PassThrough => "pass_through",
            RoutingDecision::Redirect(_) => "redirect",
            RoutingDecision::Rewrite(_) => "rewrite",
        }
    }
}

/// Paths involved in tenant routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRules {
    pub admin_prefix: String,
    pub admin_redirect: String,
    pub tenant_namespace: String,
}

impl Default for DecisionRules {
    fn default() -> Self {
        Self {
            admin_prefix: DEFAULT_ADMIN_PREFIX.to_string(),
            admin_redirect: DEFAULT_ADMIN_REDIRECT.to_string(),
            tenant_namespace: DEFAULT_TENANT_NAMESPACE.to_string(),
        }
    }
}

impl DecisionRules {
    /// Classify one request.
    ///
    /// An empty subdomain counts as no subdomain.
    pub fn decide(&self, pathname: &str, subdomain: Option<&str>) -> RoutingDecision {
        let Some(subdomain) = subdomain.filter(|s| !s.is_empty()) else {
            return RoutingDecision::PassThrough;
        };

        // Tenants never reach the admin area, whatever is nested below it.
        if pathname.starts_with(&self.admin_prefix) {
            return RoutingDecision::Redirect(self.admin_redirect.clone());
        }

        if pathname == "/" {
            let namespace = self.tenant_namespace.trim_end_matches('/');
            return RoutingDecision::Rewrite(format!("{namespace}/{subdomain}"));
        }

        RoutingDecision::PassThrough
    }
}

/// Classify with the default admin prefix and tenant namespace.
pub fn route(pathname: &str, subdomain: Option<&str>) -> RoutingDecision {
    DecisionRules::default().decide(pathname, subdomain)
}
