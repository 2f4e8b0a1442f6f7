//! Subdomain routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (url, host, path)
//!     → matcher.rs (excluded path? → pass through)
//!     → host.rs (ordered rule table → tenant subdomain)
//!     → decision.rs (path + subdomain → decision)
//!     → Return: PassThrough | Redirect(path) | Rewrite(path)
//!
//! Router Compilation (at startup):
//!     RoutingConfig
//!     → Build exclusion matchers
//!     → Bind extractor to the root domain
//!     → Freeze as immutable SubdomainRouter
//! ```
//!
//! # Design Decisions
//! - Pure functions: no state survives between requests
//! - No regex in hot path (prefix and suffix checks only)
//! - Every input maps to a decision; nothing here returns an error

pub mod decision;
pub mod host;
pub mod matcher;
pub mod router;

pub use decision::{route, DecisionRules, RoutingDecision};
pub use host::{
    extract_subdomain, HostClassification, HostRuleKind, RequestDescriptor, SubdomainExtractor,
};
pub use router::{RouteOutcome, SubdomainRouter};
