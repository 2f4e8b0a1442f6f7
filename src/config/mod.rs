//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (ROOT_DOMAIN, EDGE_UPSTREAM, ...)
//!     → validation.rs (semantic checks)
//!     → EdgeConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the root domain never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::EdgeConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RoutingConfig;
pub use schema::UpstreamConfig;
pub use validation::ValidationError;
