mod common;

use axum_test::TestServer;
use digestlink::domain::repositories::UrlStore;
use digestlink::routes::app_router;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server.get("/healthz").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert!(json["checks"]["store"].get("message").is_none());
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    store.close().await.unwrap();

    let response = server.get("/healthz").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
    assert!(json["checks"]["store"]["message"].is_string());
}

#[tokio::test]
async fn test_health_path_does_not_shadow_codes() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    store.save("health", "https://example.com/h").await.unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "https://example.com/h");
}
