//! Shared utilities for edge integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{body::Body, http::Request, Json, Router};
use serde_json::{json, Value};
use tenant_edge::config::EdgeConfig;
use tenant_edge::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// Start an upstream that echoes what it received as JSON.
pub async fn start_echo_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(echo);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn echo(req: Request<Body>) -> Json<Value> {
    Json(json!({
        "path": req.uri().path(),
        "query": req.uri().query(),
        "host": header(&req, "host"),
        "forwarded_host": header(&req, "x-forwarded-host"),
        "tenant": header(&req, "x-tenant-subdomain"),
        "request_id": header(&req, "x-request-id"),
    }))
}

fn header(req: &Request<Body>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Edge config pointing at `upstream` with the given root domain.
pub fn edge_config(upstream: SocketAddr, root_domain: &str) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.address = upstream.to_string();
    config.upstream.request_timeout_secs = 5;
    config.routing.root_domain = root_domain.into();
    config
}

/// Running edge; shuts down when dropped.
pub struct TestEdge {
    pub addr: SocketAddr,
    _shutdown: Shutdown,
}

impl TestEdge {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the edge with the given server on an ephemeral port.
pub async fn start_edge(server: HttpServer) -> TestEdge {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestEdge {
        addr,
        _shutdown: shutdown,
    }
}

/// Client that neither follows redirects nor uses a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
