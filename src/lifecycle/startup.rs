//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the HTTP server from validated configuration
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use tokio::net::TcpListener;

use crate::config::EdgeConfig;
use crate::error::EdgeError;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Start the edge and serve until shutdown.
pub async fn run(config: EdgeConfig, shutdown: &Shutdown) -> Result<(), EdgeError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        root_domain = %config.routing.root_domain,
        request_timeout_secs = config.upstream.request_timeout_secs,
        log_decisions = config.observability.log_decisions,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| EdgeError::InvalidAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    server.run(listener, shutdown.subscribe()).await
}
