//! Tenant subdomain edge.
//!
//! Classifies each request's Host header into a tenant subdomain and
//! rewrites, redirects or forwards it to the upstream application.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::EdgeConfig;
pub use error::EdgeError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{extract_subdomain, route, RoutingDecision, SubdomainRouter};
