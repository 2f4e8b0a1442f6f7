//! Request classification and dispatch decision.
//!
//! # Responsibilities
//! - Skip excluded paths before looking at the host
//! - Classify the host into a tenant subdomain
//! - Turn (path, subdomain) into a routing decision
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Excluded requests report `excluded = true` and pass through
//! - Deterministic: same input always yields the same decision

use serde::Serialize;

use crate::config::RoutingConfig;
use crate::routing::decision::{DecisionRules, RoutingDecision};
use crate::routing::host::{HostClassification, RequestDescriptor, SubdomainExtractor};
use crate::routing::matcher::{AnyMatcher, Matcher};

/// Everything the edge learned about one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteOutcome {
    /// Path matched the exclusion set; the host was never inspected.
    pub excluded: bool,
    /// Rule table result, absent for excluded paths.
    pub classification: Option<HostClassification>,
    pub decision: RoutingDecision,
}

impl RouteOutcome {
    /// Tenant label, if one was detected.
    pub fn subdomain(&self) -> Option<&str> {
        self.classification
            .as_ref()
            .and_then(|c| c.subdomain.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Compiled subdomain router.
#[derive(Debug)]
pub struct SubdomainRouter {
    extractor: SubdomainExtractor,
    rules: DecisionRules,
    exclusions: AnyMatcher,
}

impl SubdomainRouter {
    pub fn new(extractor: SubdomainExtractor, rules: DecisionRules, exclusions: AnyMatcher) -> Self {
        Self {
            extractor,
            rules,
            exclusions,
        }
    }

    /// Build the router from routing configuration.
    pub fn from_config(config: &RoutingConfig) -> Self {
        let exclusions = AnyMatcher::exclusions(
            config.excluded_prefixes.iter().cloned(),
            config.exclude_static_files,
        );
        let rules = DecisionRules {
            admin_prefix: config.admin_prefix.clone(),
            admin_redirect: config.admin_redirect.clone(),
            tenant_namespace: config.tenant_namespace.clone(),
        };

        Self::new(SubdomainExtractor::new(config.root_domain.clone()), rules, exclusions)
    }

    pub fn root_domain(&self) -> &str {
        self.extractor.root_domain()
    }

    /// True if the path bypasses subdomain routing entirely.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclusions.matches(path)
    }

    /// Evaluate one request.
    pub fn evaluate(&self, request: &RequestDescriptor<'_>) -> RouteOutcome {
        if self.is_excluded(request.path) {
            return RouteOutcome {
                excluded: true,
                classification: None,
                decision: RoutingDecision::PassThrough,
            };
        }

        let classification = self.extractor.classify(request);
        let decision = self
            .rules
            .decide(request.path, classification.subdomain.as_deref());

        RouteOutcome {
            excluded: false,
            classification: Some(classification),
            decision,
        }
    }
}
