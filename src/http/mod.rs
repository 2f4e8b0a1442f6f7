//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → middleware/subdomain.rs (routing decision)
//!         → redirect: response.rs builds 307, done
//!         → rewrite: request.rs swaps the path
//!     → server.rs forwards to the upstream
//!     → Send upstream response to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{Tenant, X_FORWARDED_HOST, X_REQUEST_ID, X_TENANT_SUBDOMAIN};
pub use server::{AppState, HttpServer};
