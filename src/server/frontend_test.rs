//! Tests for frontend routes

use super::testing::TestServer;
use super::*;
use crate::probe::{HttpProbe, MockProbe};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_health_ok_when_backend_reachable() {
    let probe = Arc::new(MockProbe::succeeding());
    let server = TestServer::start(frontend_router(FrontendState::new(probe, "web-1"))).await;

    assert_eq!(server.get("/health").await, (200, "OK".to_string()));
    server.stop().await;
}

#[tokio::test]
async fn test_health_ko_when_backend_down() {
    let probe = Arc::new(MockProbe::failing("connection refused"));
    let server = TestServer::start(frontend_router(FrontendState::new(probe, "web-1"))).await;

    assert_eq!(server.get("/health").await, (500, "KO".to_string()));
    server.stop().await;
}

#[tokio::test]
async fn test_other_paths_greet_with_hostname() {
    let probe = Arc::new(MockProbe::failing("unused"));
    let server =
        TestServer::start(frontend_router(FrontendState::new(probe.clone(), "web-1"))).await;

    for path in ["/", "/products", "/health/extra"] {
        assert_eq!(
            server.get(path).await,
            (200, "Hello from frontend on web-1".to_string())
        );
    }
    assert_eq!(probe.calls(), 0, "Greeting must not probe the backend");
    server.stop().await;
}

/// Frontend wired to a real backend that later goes away
#[tokio::test]
async fn test_partial_outage_with_real_backend() {
    // ARRANGE: a minimal backend
    let backend = TestServer::start(
        axum::Router::new().route("/", axum::routing::get(|| async { "backend-v1" })),
    )
    .await;
    let probe = Arc::new(HttpProbe::new(backend.url("/")));
    let frontend = TestServer::start(frontend_router(FrontendState::new(probe, "web-1"))).await;

    // Backend up
    assert_eq!(frontend.get("/health").await.0, 200);

    // ACT: take the backend down
    backend.stop().await;

    // ASSERT: frontend health follows
    assert_eq!(frontend.get("/health").await, (500, "KO".to_string()));
    assert_eq!(frontend.get("/").await.0, 200);
    frontend.stop().await;
}

#[tokio::test]
async fn test_unreachable_backend_url() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let probe = Arc::new(HttpProbe::new(format!("http://{}", addr)));
    let server = TestServer::start(frontend_router(FrontendState::new(probe, "web-1"))).await;

    assert_eq!(server.get("/health").await.0, 500);
    server.stop().await;
}
