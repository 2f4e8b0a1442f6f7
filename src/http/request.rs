//! Request inspection and transformation.
//!
//! # Responsibilities
//! - Request ID layers (UUID v4, `x-request-id`)
//! - Extract routing-relevant information (url, host, path)
//! - Rewrite the request path, keeping the query string
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A missing Host header is the empty string, never an error
//! - Origin-form request lines get their URL rebuilt from the Host header

use std::str::FromStr;

use axum::http::{header, uri::PathAndQuery, HeaderName, Request, Uri};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::error::EdgeError;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
pub static X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
pub static X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
pub static X_TENANT_SUBDOMAIN: HeaderName = HeaderName::from_static("x-tenant-subdomain");

/// Tenant detected for a request, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant(pub String);

/// Layer that assigns a UUID request id when the client sent none.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid)
}

/// Layer that copies the request id onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID.clone())
}

/// Request id header value, or "unknown".
pub fn request_id<B>(req: &Request<B>) -> &str {
    req.headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Host header value, falling back to the URI authority (HTTP/2).
pub fn host<B>(req: &Request<B>) -> &str {
    req.headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
        .unwrap_or("")
}

/// Full request URL as the client addressed it.
pub fn request_url<B>(req: &Request<B>) -> String {
    let uri = req.uri();
    if uri.scheme().is_some() {
        return uri.to_string();
    }

    let scheme = req
        .headers()
        .get(&X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    format!("{scheme}://{}{path_and_query}", host(req))
}

/// Whether a detected tenant label may be used in a path or header.
///
/// Only ASCII alphanumerics, `-` and inner dots (nested labels) qualify.
pub fn is_tenant_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('.')
        && !label.ends_with('.')
        && !label.contains("..")
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
}

/// Replace the path of `uri`, keeping scheme, authority and query.
pub fn rewrite_path(uri: &Uri, path: &str) -> Result<Uri, EdgeError> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(
        PathAndQuery::from_str(&path_and_query)
            .map_err(|e| EdgeError::InvalidRewrite(e.to_string()))?,
    );
    Uri::from_parts(parts).map_err(|e| EdgeError::InvalidRewrite(e.to_string()))
}
