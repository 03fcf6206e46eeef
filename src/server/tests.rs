//! Tests for the HTTP server wiring

use crate::config::Config;
use crate::server::builder::ServerBuilder;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use actix_web::{test, web};

#[tokio::test]
async fn test_builder_requires_config() {
    let result = ServerBuilder::new().build().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_builder_with_default_config_uses_memory() {
    let server = ServerBuilder::new()
        .with_config(Config::default())
        .build()
        .await
        .unwrap();

    assert_eq!(server.config().port, Config::default().server().port);
    let health = server.state().storage.health_check().await.unwrap();
    assert_eq!(health.backend, "memory");
}

#[actix_web::test]
async fn test_health_endpoint() {
    let state = AppState::new(Config::default(), StorageLayer::in_memory());
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["storage"]["backend"], "memory");
}

#[actix_web::test]
async fn test_api_requires_token() {
    let state = AppState::new(Config::default(), StorageLayer::in_memory());
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/api/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_server_header_is_set() {
    let state = AppState::new(Config::default(), StorageLayer::in_memory());
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("Server").unwrap(), "SafeNote-RS");
}
