//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Metrics → Build server → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or Shutdown::trigger → Stop accepting → Drain in-flight → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then observability, then listener
//! - Shutdown is graceful; in-flight requests finish

pub mod shutdown;
pub mod startup;

pub use shutdown::{shutdown_signal, Shutdown};
