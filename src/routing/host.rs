//! Subdomain extraction from the Host header.
//!
//! # Responsibilities
//! - Strip the port from host and root domain
//! - Classify the host against an ordered rule table
//! - Return the tenant label, or none
//!
//! # Design Decisions
//! - First rule whose predicate holds decides; no fallthrough
//! - Every input maps to a result, malformed hosts simply yield none
//! - No regex: each pattern is a handful of `str` operations

use serde::Serialize;

const VERCEL_SUFFIX: &str = ".vercel.app";
const PREVIEW_SEPARATOR: &str = "---";
const LOCAL_DEV_SCHEME: &str = "http://";
const LOCAL_DEV_SUFFIX: &str = ".localhost";

/// Request metadata the extractor looks at.
#[derive(Debug, Clone, Copy)]
pub struct RequestDescriptor<'a> {
    /// Full request URL. Only used to detect local development.
    pub url: &'a str,
    /// Raw `Host` header value, possibly with a port.
    pub host_header: &'a str,
    /// Request path.
    pub path: &'a str,
}

/// Which rule decided a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostRuleKind {
    /// `tenant.localhost` or anything reached via `127.0.0.1`.
    LocalDevelopment,
    /// `tenant---branch.vercel.app`
    PreviewDeployment,
    /// `tenant.project.vercel.app`
    PlatformWildcard,
    /// `tenant.<root domain>`
    CustomDomain,
}

impl HostRuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostRuleKind::LocalDevelopment => "local_development",
            HostRuleKind::PreviewDeployment => "preview_deployment",
            HostRuleKind::PlatformWildcard => "platform_wildcard",
            HostRuleKind::CustomDomain => "custom_domain",
        }
    }
}

impl std::fmt::Display for HostRuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of running the rule table over one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostClassification {
    pub rule: HostRuleKind,
    pub subdomain: Option<String>,
}

/// Inputs shared by every rule, computed once per request.
#[derive(Debug)]
struct HostInput<'a> {
    url: &'a str,
    hostname: &'a str,
    root_domain: &'a str,
}

/// A predicate + extractor pair.
struct HostRule {
    kind: HostRuleKind,
    applies: fn(&HostInput<'_>) -> bool,
    extract: fn(&HostInput<'_>) -> Option<String>,
}

/// Evaluated top to bottom. Order matters: local development beats
/// everything and `.vercel.app` hosts never reach the custom domain rule.
static HOST_RULES: &[HostRule] = &[
    HostRule {
        kind: HostRuleKind::LocalDevelopment,
        applies: is_local_development,
        extract: extract_local_development,
    },
    HostRule {
        kind: HostRuleKind::PreviewDeployment,
        applies: is_preview_deployment,
        extract: extract_preview_deployment,
    },
    HostRule {
        kind: HostRuleKind::PlatformWildcard,
        applies: is_platform_host,
        extract: extract_platform_wildcard,
    },
    HostRule {
        kind: HostRuleKind::CustomDomain,
        applies: always,
        extract: extract_custom_domain,
    },
];

/// Subdomain extractor bound to a root domain.
#[derive(Debug, Clone)]
pub struct SubdomainExtractor {
    root_domain: String,
}

impl SubdomainExtractor {
    /// Create an extractor. The root domain may carry a port.
    pub fn new(root_domain: impl Into<String>) -> Self {
        Self {
            root_domain: root_domain.into(),
        }
    }

    /// Configured root domain, as given.
    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    /// Run the rule table and report which rule decided.
    pub fn classify(&self, request: &RequestDescriptor<'_>) -> HostClassification {
        let input = HostInput {
            url: request.url,
            hostname: strip_port(request.host_header),
            root_domain: strip_port(&self.root_domain),
        };

        // The last rule always applies, so the fallback is never taken.
        HOST_RULES
            .iter()
            .find(|rule| (rule.applies)(&input))
            .map(|rule| HostClassification {
                rule: rule.kind,
                subdomain: (rule.extract)(&input),
            })
            .unwrap_or(HostClassification {
                rule: HostRuleKind::CustomDomain,
                subdomain: None,
            })
    }

    /// Tenant label for the request, if any.
    pub fn extract(&self, request: &RequestDescriptor<'_>) -> Option<String> {
        self.classify(request).subdomain
    }
}

/// Extract the tenant subdomain from a request URL and Host header.
pub fn extract_subdomain(url: &str, host_header: &str, root_domain: &str) -> Option<String> {
    SubdomainExtractor::new(root_domain).extract(&RequestDescriptor {
        url,
        host_header,
        path: "",
    })
}

/// Everything before the first `:`.
pub fn strip_port(host: &str) -> &str {
    host.split(':').next().unwrap_or(host)
}

fn always(_: &HostInput<'_>) -> bool {
    true
}

fn is_local_development(input: &HostInput<'_>) -> bool {
    input.url.contains("localhost") || input.url.contains("127.0.0.1")
}

fn extract_local_development(input: &HostInput<'_>) -> Option<String> {
    if let Some(label) = find_local_dev_label(input.url) {
        return Some(label.to_string());
    }

    if input.hostname.contains(LOCAL_DEV_SUFFIX) {
        return input.hostname.split('.').next().map(str::to_string);
    }

    None
}

/// First `http://<label>.localhost` in the URL, where the label is a
/// non-empty run of non-dot characters.
fn find_local_dev_label(url: &str) -> Option<&str> {
    url.match_indices(LOCAL_DEV_SCHEME).find_map(|(idx, _)| {
        let rest = &url[idx + LOCAL_DEV_SCHEME.len()..];
        let dot = rest.find('.')?;
        let (label, tail) = rest.split_at(dot);
        (!label.is_empty() && tail.starts_with(LOCAL_DEV_SUFFIX)).then_some(label)
    })
}

fn is_preview_deployment(input: &HostInput<'_>) -> bool {
    input.hostname.contains(PREVIEW_SEPARATOR) && input.hostname.ends_with(VERCEL_SUFFIX)
}

fn extract_preview_deployment(input: &HostInput<'_>) -> Option<String> {
    input
        .hostname
        .split(PREVIEW_SEPARATOR)
        .next()
        .map(str::to_string)
}

fn is_platform_host(input: &HostInput<'_>) -> bool {
    input.hostname.ends_with(VERCEL_SUFFIX)
}

fn extract_platform_wildcard(input: &HostInput<'_>) -> Option<String> {
    let prefix = input.hostname.strip_suffix(VERCEL_SUFFIX)?;
    let (label, project) = prefix.split_once('.')?;
    if label.is_empty() || project.is_empty() {
        return None;
    }

    let project_domain = format!("{project}{VERCEL_SUFFIX}");
    (project_domain == input.root_domain).then(|| label.to_string())
}

fn extract_custom_domain(input: &HostInput<'_>) -> Option<String> {
    let root = input.root_domain;
    let host = input.hostname;

    if host == root || host == format!("www.{root}") {
        return None;
    }

    host.strip_suffix(&format!(".{root}")).map(str::to_string)
}
