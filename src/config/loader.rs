//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Root domain override. The second name is what the frontend build uses.
pub const ROOT_DOMAIN_ENV: &[&str] = &["ROOT_DOMAIN", "NEXT_PUBLIC_ROOT_DOMAIN"];
pub const BIND_ADDRESS_ENV: &str = "EDGE_BIND_ADDRESS";
pub const UPSTREAM_ENV: &str = "EDGE_UPSTREAM";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Environment variables override values from the file.
pub fn load_config(path: &Path) -> Result<EdgeConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Like [`load_config`], reading overrides through `lookup`.
pub fn load_config_with_env<F>(path: &Path, lookup: F) -> Result<EdgeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let content = fs::read_to_string(path)?;
    let mut config: EdgeConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

impl EdgeConfig {
    /// Defaults plus environment overrides, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = EdgeConfig::default();
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

/// Apply overrides; blank values are ignored.
pub fn apply_env_overrides<F>(config: &mut EdgeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(root) = ROOT_DOMAIN_ENV.iter().find_map(|key| lookup(*key)) {
        config.routing.root_domain = root.trim().to_string();
    }
    if let Some(bind) = lookup(BIND_ADDRESS_ENV) {
        config.listener.bind_address = bind.trim().to_string();
    }
    if let Some(upstream) = lookup(UPSTREAM_ENV) {
        config.upstream.address = upstream.trim().to_string();
    }
}
