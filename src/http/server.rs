//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (request ID, tracing, timeout, subdomain routing)
//! - Bind server to listener
//! - Forward requests to the upstream application
//!
//! # Design Decisions
//! - One upstream; the edge only decides paths, never destinations
//! - Shared state is read-only and cloned cheaply per request

use axum::{
    body::Body,
    extract::State,
    http::{
        header,
        uri::{Authority, PathAndQuery, Scheme},
        Request, Uri,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::EdgeConfig;
use crate::error::EdgeError;
use crate::http::middleware::subdomain_middleware;
use crate::http::request::{self, Tenant, X_FORWARDED_HOST, X_REQUEST_ID};
use crate::lifecycle::shutdown_signal;
use crate::observability::{observer_for, RoutingObserver};
use crate::routing::SubdomainRouter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<SubdomainRouter>,
    pub observer: Arc<dyn RoutingObserver>,
    pub client: Client<HttpConnector, Body>,
    pub upstream: Authority,
}

impl AppState {
    /// Build state from configuration.
    pub fn from_config(config: &EdgeConfig) -> Result<Self, EdgeError> {
        let upstream = Authority::from_str(&config.upstream.address)
            .map_err(|_| EdgeError::InvalidAddress(config.upstream.address.clone()))?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(
            config.upstream.connect_timeout_secs,
        )));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            router: Arc::new(SubdomainRouter::from_config(&config.routing)),
            observer: observer_for(config.observability.log_decisions),
            client,
            upstream,
        })
    }

    /// Swap the decision observer.
    pub fn with_observer(mut self, observer: Arc<dyn RoutingObserver>) -> Self {
        self.observer = observer;
        self
    }
}

/// HTTP server for the tenant edge.
pub struct HttpServer {
    router: Router,
    config: EdgeConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, EdgeError> {
        let state = AppState::from_config(&config)?;
        Ok(Self::with_state(config, state))
    }

    /// Create a server around prebuilt state.
    pub fn with_state(config: EdgeConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                subdomain_middleware,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.upstream.request_timeout_secs,
            )))
            .layer(request::propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(request::set_request_id_layer())
    }

    /// The assembled service, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C or a shutdown broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), EdgeError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            root_domain = %self.config.routing.root_domain,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }
}

/// Forward the (possibly rewritten) request to the upstream.
async fn forward_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    let request_id = request::request_id(&req).to_string();
    let path = req.uri().path().to_string();
    let tenant = req.extensions().get::<Tenant>().map(|t| t.0.clone());

    match forward(&state, req).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                path = %path,
                tenant = tenant.as_deref().unwrap_or("-"),
                upstream = %state.upstream,
                error = %e,
                "Upstream error"
            );
            e.into_response()
        }
    }
}

async fn forward(state: &AppState, req: Request<Body>) -> Result<Response, EdgeError> {
    let (mut parts, body) = req.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = Uri::from_parts(uri_parts)
        .map_err(|e| EdgeError::InvalidRewrite(e.to_string()))?;

    if let Some(host) = parts.headers.get(header::HOST).cloned() {
        parts.headers.insert(&X_FORWARDED_HOST, host);
    }

    tracing::debug!(
        request_id = ?parts.headers.get(&X_REQUEST_ID),
        tenant = ?parts.extensions.get::<Tenant>().map(|t| t.0.as_str()),
        uri = %parts.uri,
        "Forwarding request"
    );

    let response = state
        .client
        .request(Request::from_parts(parts, body))
        .await?;

    let (parts, body) = response.into_parts();
    Ok(Response::from_parts(parts, Body::new(body)))
}
