//! Subdomain routing middleware.
//! Executes the router's decision for every request.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::EdgeError;
use crate::http::request::{self, Tenant, X_TENANT_SUBDOMAIN};
use crate::http::response::redirect;
use crate::http::server::AppState;
use crate::observability::{metrics, RoutingEvent};
use crate::routing::{RequestDescriptor, RouteOutcome, RoutingDecision};

pub async fn subdomain_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();

    // Tenant identity is only ever asserted by the edge.
    req.headers_mut().remove(&X_TENANT_SUBDOMAIN);
    req.extensions_mut().remove::<Tenant>();

    let outcome = evaluate(&state, &req);
    let decision = outcome.decision.kind();

    // 1. Tag the request with its tenant for the upstream.
    if let Some(subdomain) = outcome.subdomain() {
        if !request::is_tenant_label(subdomain) {
            tracing::warn!(
                request_id = %request::request_id(&req),
                host = %request::host(&req),
                "Rejected malformed tenant label"
            );
            let response = EdgeError::InvalidTenant(subdomain.to_string()).into_response();
            metrics::record_request(decision, response.status().as_u16(), start);
            return response;
        }
        if let Ok(value) = HeaderValue::from_str(subdomain) {
            req.headers_mut().insert(&X_TENANT_SUBDOMAIN, value);
        }
        req.extensions_mut().insert(Tenant(subdomain.to_string()));
    }

    // 2. Execute the decision.
    let response = match outcome.decision {
        RoutingDecision::PassThrough => next.run(req).await,
        RoutingDecision::Redirect(location) => redirect(&location),
        RoutingDecision::Rewrite(path) => match request::rewrite_path(req.uri(), &path) {
            Ok(uri) => {
                *req.uri_mut() = uri;
                next.run(req).await
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request::request_id(&req),
                    path = %path,
                    error = %e,
                    "Rejected tenant rewrite"
                );
                e.into_response()
            }
        },
    };

    metrics::record_request(decision, response.status().as_u16(), start);
    response
}

fn evaluate(state: &AppState, req: &Request<Body>) -> RouteOutcome {
    let url = request::request_url(req);
    let host = request::host(req);
    let path = req.uri().path();

    let outcome = state.router.evaluate(&RequestDescriptor {
        url: &url,
        host_header: host,
        path,
    });

    state.observer.on_decision(&RoutingEvent {
        request_id: request::request_id(req),
        host,
        path,
        root_domain: state.router.root_domain(),
        outcome: &outcome,
    });

    let rule = outcome
        .classification
        .as_ref()
        .map(|c| c.rule.as_str())
        .unwrap_or("excluded");
    metrics::record_decision(rule, outcome.decision.kind());

    outcome
}
