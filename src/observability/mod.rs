//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Edge middleware produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → hook.rs (per-request routing decision observer)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON optional) for machine parsing
//! - Request ID flows through every log line and upstream
//! - Decision logging is injected, off in release builds by default

pub mod hook;
pub mod logging;
pub mod metrics;

pub use hook::{observer_for, NoopObserver, RoutingEvent, RoutingObserver, TracingObserver};
