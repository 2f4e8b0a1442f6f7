//! Errors raised by the edge outside of routing.
//!
//! Routing itself never fails; these cover startup and forwarding.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum EdgeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("malformed tenant label {0:?}")]
    InvalidTenant(String),

    #[error("rewritten URI is invalid: {0}")]
    InvalidRewrite(String),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_failures_convert() {
        let err: EdgeError = ConfigError::Validation(Vec::new()).into();
        assert!(matches!(err, EdgeError::Config(_)));
        assert!(err.to_string().starts_with("configuration error: "));
    }
}
