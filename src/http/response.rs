//! Response construction.
//!
//! # Responsibilities
//! - Build redirect responses for routing decisions
//! - Map edge errors to appropriate HTTP status codes
//!
//! # Design Decisions
//! - Redirects are 307 so the method and body survive
//! - Upstream failures are 502; rewrite failures are the client's (400)
//! - Error bodies are short plain text, details go to the log

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::EdgeError;

/// Same-origin temporary redirect.
pub fn redirect(path: &str) -> Response {
    Redirect::temporary(path).into_response()
}

impl EdgeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EdgeError::Upstream(_) => StatusCode::BAD_GATEWAY,
            EdgeError::InvalidRewrite(_) | EdgeError::InvalidTenant(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match status {
            StatusCode::BAD_GATEWAY => "Upstream request failed",
            StatusCode::BAD_REQUEST => "Invalid tenant path",
            _ => "Internal error",
        };
        (status, body).into_response()
    }
}
