//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the root domain
//! - Check routing paths are absolute
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;

use thiserror::Error;

use crate::config::schema::EdgeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.address: expected host:port, got {0:?}")]
    InvalidUpstream(String),

    #[error("routing.root_domain: {reason}")]
    InvalidRootDomain { reason: &'static str },

    #[error("{field}: path {value:?} must start with '/'")]
    RelativePath { field: &'static str, value: String },

    #[error("{field}: must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("observability.log_level: unknown level {0:?}")]
    UnknownLogLevel(String),
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if !is_upstream_authority(&config.upstream.address) {
        errors.push(ValidationError::InvalidUpstream(
            config.upstream.address.clone(),
        ));
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if let Err(reason) = check_root_domain(&config.routing.root_domain) {
        errors.push(ValidationError::InvalidRootDomain { reason });
    }

    let routing = &config.routing;
    check_path(&mut errors, "routing.admin_prefix", &routing.admin_prefix);
    check_path(&mut errors, "routing.admin_redirect", &routing.admin_redirect);
    check_path(&mut errors, "routing.tenant_namespace", &routing.tenant_namespace);
    for prefix in &routing.excluded_prefixes {
        check_path(&mut errors, "routing.excluded_prefixes", prefix);
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "upstream.connect_timeout_secs",
        });
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "upstream.request_timeout_secs",
        });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

/// Upstreams may be named hosts (`app:3000`), not just socket addresses.
fn is_upstream_authority(value: &str) -> bool {
    match Authority::from_str(value) {
        Ok(authority) => !authority.host().is_empty() && !authority.as_str().contains('@'),
        Err(_) => false,
    }
}

fn check_path(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if !value.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            field,
            value: value.to_string(),
        });
    }
}

fn check_root_domain(root: &str) -> Result<(), &'static str> {
    if root.is_empty() {
        return Err("must not be empty");
    }
    if root.contains("://") || root.contains('/') {
        return Err("must be a bare host, without scheme or path");
    }

    let (host, port) = match root.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (root, None),
    };
    if host.is_empty() || host.starts_with('.') || host.ends_with('.') {
        return Err("host part is malformed");
    }
    if let Some(port) = port {
        if port.parse::<u16>().is_err() {
            return Err("port must be a number between 0 and 65535");
        }
    }

    Ok(())
}
