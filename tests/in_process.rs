//! Edge behaviour exercised in-process, without a socket.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::{middleware, routing::get, Router};
use tenant_edge::http::middleware::subdomain_middleware;
use tenant_edge::http::{AppState, Tenant};
use tenant_edge::HttpServer;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_redirect_needs_no_upstream() {
    let upstream = common::closed_port().await;
    let server = HttpServer::new(common::edge_config(upstream, "myproj.vercel.app")).unwrap();

    let req = Request::builder()
        .uri("/admin")
        .header(header::HOST, "acme.myproj.vercel.app")
        .body(Body::empty())
        .unwrap();
    let res = server.router().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()[header::LOCATION], "/");
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_preview_deployment_admin_is_redirected() {
    let upstream = common::closed_port().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();

    let req = Request::builder()
        .uri("/admin/users")
        .header(header::HOST, "acme---feature-x.vercel.app")
        .body(Body::empty())
        .unwrap();
    let res = server.router().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_foreign_platform_host_is_not_a_tenant() {
    // Not our project, so /admin is forwarded (and fails on the closed upstream).
    let upstream = common::closed_port().await;
    let server = HttpServer::new(common::edge_config(upstream, "myproj.vercel.app")).unwrap();

    let req = Request::builder()
        .uri("/admin")
        .header(header::HOST, "acme.other.vercel.app")
        .body(Body::empty())
        .unwrap();
    let res = server.router().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_path_traversal_label_never_reaches_upstream() {
    let upstream = common::closed_port().await;
    let server = HttpServer::new(common::edge_config(upstream, "example.com")).unwrap();

    let req = Request::builder()
        .uri("/")
        .header(header::HOST, "x/../../admin.example.com")
        .body(Body::empty())
        .unwrap();
    let res = server.router().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_handlers_see_only_the_detected_tenant() {
    let upstream = common::closed_port().await;
    let state = AppState::from_config(&common::edge_config(upstream, "example.com")).unwrap();
    let app = Router::new()
        .route(
            "/pricing",
            get(|req: Request<Body>| async move {
                req.extensions()
                    .get::<Tenant>()
                    .map(|t| t.0.clone())
                    .unwrap_or_default()
            }),
        )
        .layer(middleware::from_fn_with_state(state, subdomain_middleware));

    for (host, expected) in [("shop.example.com", "shop"), ("example.com", "")] {
        let mut req = Request::builder()
            .uri("/pricing")
            .header(header::HOST, host)
            .body(Body::empty())
            .unwrap();
        req.extensions_mut().insert(Tenant("victim".into()));

        let res = app.clone().oneshot(req).await.unwrap();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], expected.as_bytes(), "host {host}");
    }
}
