//! End-to-end routing through the edge to a live upstream.

use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use serde_json::Value;
use tenant_edge::http::AppState;
use tenant_edge::observability::{RoutingEvent, RoutingObserver};
use tenant_edge::HttpServer;

mod common;

async fn get_json(res: reqwest::Response) -> Value {
    assert_eq!(res.status(), 200, "upstream should answer");
    res.json().await.unwrap()
}

#[tokio::test]
async fn test_tenant_root_is_rewritten_upstream() {
    let upstream = common::start_echo_upstream().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();
    let edge = common::start_edge(server).await;

    let res = common::client()
        .get(edge.url("/?ref=newsletter"))
        .header("Host", "shop.example.com")
        .send()
        .await
        .unwrap();
    let seen = get_json(res).await;

    assert_eq!(seen["path"], "/s/shop");
    assert_eq!(seen["query"], "ref=newsletter");
    assert_eq!(seen["tenant"], "shop");
    assert_eq!(seen["host"], "shop.example.com");
    assert_eq!(seen["forwarded_host"], "shop.example.com");
}

#[tokio::test]
async fn test_tenant_admin_is_redirected() {
    let upstream = common::start_echo_upstream().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();
    let edge = common::start_edge(server).await;

    let res = common::client()
        .get(edge.url("/admin/settings?tab=billing"))
        .header("Host", "shop.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/");
}

#[tokio::test]
async fn test_other_tenant_paths_pass_through() {
    let upstream = common::start_echo_upstream().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();
    let edge = common::start_edge(server).await;

    let res = common::client()
        .get(edge.url("/pricing?plan=pro"))
        .header("Host", "shop.example.com")
        .send()
        .await
        .unwrap();
    let seen = get_json(res).await;

    assert_eq!(seen["path"], "/pricing");
    assert_eq!(seen["query"], "plan=pro");
    assert_eq!(seen["tenant"], "shop");
}

#[tokio::test]
async fn test_apex_admin_reaches_upstream() {
    let upstream = common::start_echo_upstream().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();
    let edge = common::start_edge(server).await;

    for host in ["example.com", "www.example.com"] {
        let res = common::client()
            .get(edge.url("/admin"))
            .header("Host", host)
            .send()
            .await
            .unwrap();
        let seen = get_json(res).await;

        assert_eq!(seen["path"], "/admin", "host {host}");
        assert_eq!(seen["tenant"], Value::Null, "host {host}");
    }
}

#[tokio::test]
async fn test_excluded_paths_bypass_routing() {
    let upstream = common::start_echo_upstream().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();
    let edge = common::start_edge(server).await;

    for path in ["/api/admin", "/_next/static/app.js", "/favicon.ico"] {
        let res = common::client()
            .get(edge.url(path))
            .header("Host", "shop.example.com")
            .send()
            .await
            .unwrap();
        let seen = get_json(res).await;

        assert_eq!(seen["path"], path);
        assert_eq!(seen["tenant"], Value::Null, "path {path}");
    }
}

#[tokio::test]
async fn test_client_tenant_header_is_replaced() {
    let upstream = common::start_echo_upstream().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();
    let edge = common::start_edge(server).await;

    let cases = [
        ("example.com", "/admin", Value::Null),
        ("shop.example.com", "/api/orders", Value::Null),
        ("shop.example.com", "/pricing", Value::from("shop")),
    ];
    for (host, path, expected) in cases {
        let res = common::client()
            .get(edge.url(path))
            .header("Host", host)
            .header("X-Tenant-Subdomain", "victim")
            .send()
            .await
            .unwrap();
        let seen = get_json(res).await;

        assert_eq!(seen["path"], path);
        assert_eq!(seen["tenant"], expected, "host {host} path {path}");
    }
}

#[tokio::test]
async fn test_malformed_tenant_label_is_rejected() {
    let upstream = common::start_echo_upstream().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();
    let edge = common::start_edge(server).await;

    for host in ["x/../../admin.example.com", "shop?admin=1.example.com"] {
        let res = common::client()
            .get(edge.url("/"))
            .header("Host", host)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "host {host}");
    }
}

#[tokio::test]
async fn test_local_development_host() {
    let upstream = common::start_echo_upstream().await;
    let server = HttpServer::new(common::edge_config(upstream, "localhost:3000")).unwrap();
    let edge = common::start_edge(server).await;

    let res = common::client()
        .get(edge.url("/"))
        .header("Host", "tenant.localhost:3000")
        .send()
        .await
        .unwrap();
    let seen = get_json(res).await;

    assert_eq!(seen["path"], "/s/tenant");
    assert_eq!(seen["tenant"], "tenant");
}

#[tokio::test]
async fn test_request_id_is_forwarded_and_returned() {
    let upstream = common::start_echo_upstream().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();
    let edge = common::start_edge(server).await;

    let res = common::client()
        .get(edge.url("/"))
        .header("Host", "example.com")
        .send()
        .await
        .unwrap();
    let returned = res.headers()["x-request-id"].to_str().unwrap().to_string();
    let seen = get_json(res).await;

    assert!(!returned.is_empty());
    assert_eq!(seen["request_id"], returned.as_str());
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let upstream = common::closed_port().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();
    let edge = common::start_edge(server).await;

    let res = common::client()
        .get(edge.url("/pricing"))
        .header("Host", "shop.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
}

#[derive(Default)]
struct Recorder(Mutex<Vec<(String, String, Option<String>)>>);

impl RoutingObserver for Recorder {
    fn on_decision(&self, event: &RoutingEvent<'_>) {
        self.0.lock().unwrap().push((
            event.host.to_string(),
            event.outcome.decision.kind().to_string(),
            event.outcome.subdomain().map(str::to_string),
        ));
    }
}

#[tokio::test]
async fn test_observer_sees_every_decision() {
    let upstream = common::start_echo_upstream().await;
    let config = common::edge_config(upstream, "example.com");
    let recorder = Arc::new(Recorder::default());
    let state = AppState::from_config(&config)
        .unwrap()
        .with_observer(recorder.clone());
    let edge = common::start_edge(HttpServer::with_state(config, state)).await;

    let client = common::client();
    for (host, path) in [("shop.example.com", "/"), ("example.com", "/admin")] {
        client
            .get(edge.url(path))
            .header("Host", host)
            .send()
            .await
            .unwrap();
    }

    let events = recorder.0.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            ("shop.example.com".to_string(), "rewrite".to_string(), Some("shop".to_string())),
            ("example.com".to_string(), "pass_through".to_string(), None),
        ]
    );
}
