//! End-to-end HTTP flows over an in-memory SQLite database

use crate::common::database::test_storage_config;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{test, web};
use safenote_rs::config::Config;
use safenote_rs::server::{AppState, HttpServer};
use safenote_rs::storage::StorageLayer;
use serde_json::{Value, json};

async fn app_state() -> AppState {
    let storage = StorageLayer::new(&test_storage_config())
        .await
        .expect("storage layer");
    AppState::new(Config::default(), storage)
}

async fn call<S, B>(
    app: &S,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::default().method(method).uri(uri);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {}", token)));
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }

    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Register a user and return `(user_id, access_token)`
async fn register<S, B>(app: &S, email: &str) -> (String, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = call(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": email, "password": "correct-horse-battery" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register {}: {}", email, body);

    (
        body["data"]["user"]["id"].as_str().unwrap().to_string(),
        body["data"]["tokens"]["access_token"]
            .as_str()
            .unwrap()
            .to_string(),
    )
}

#[actix_web::test]
async fn test_register_login_refresh_and_me() {
    let app = test::init_service(HttpServer::create_app(web::Data::new(app_state().await))).await;
    let (user_id, _) = register(&app, "Founder@Example.com").await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "founder@example.com", "password": "another-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "founder@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "founder@example.com", "password": "correct-horse-battery" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let refresh_token = body["data"]["tokens"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, body) = call(
        &app,
        Method::POST,
        "/auth/refresh",
        None,
        Some(json!({ "refreshToken": refresh_token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let (status, body) = call(&app, Method::GET, "/api/me", Some(&access_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id);
    assert_eq!(body["data"]["email"], "founder@example.com");
}

#[actix_web::test]
async fn test_team_invitation_flow() {
    let app = test::init_service(HttpServer::create_app(web::Data::new(app_state().await))).await;
    let (_, owner) = register(&app, "owner@example.com").await;
    let (_, member) = register(&app, "member@example.com").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/companies",
        Some(&owner),
        Some(json!({ "name": "Acme Robotics" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let company_id = body["data"]["id"].as_str().unwrap().to_string();
    let company_uri = format!("/api/companies/{}", company_id);
    let members_uri = format!("{}/members", company_uri);

    let (status, body) = call(
        &app,
        Method::POST,
        &members_uri,
        Some(&owner),
        Some(json!({ "email": "member@example.com", "permission": "view" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let member_id = body["data"]["id"].as_str().unwrap().to_string();

    // Inviting the same user twice conflicts
    let (status, _) = call(
        &app,
        Method::POST,
        &members_uri,
        Some(&owner),
        Some(json!({ "email": "member@example.com", "permission": "edit" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Pending members cannot read the company
    let (status, _) = call(&app, Method::GET, &company_uri, Some(&member), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Only the owner may change permissions, and only after acceptance
    let member_uri = format!("{}/{}", members_uri, member_id);
    let (status, _) = call(
        &app,
        Method::PATCH,
        &member_uri,
        Some(&owner),
        Some(json!({ "permission": "create" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let accept_uri = format!("/api/invites/{}/accept", member_id);
    let (status, _) = call(&app, Method::POST, &accept_uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, Method::POST, &accept_uri, Some(&member), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["invite_status"], "accepted");

    let (status, _) = call(&app, Method::POST, &accept_uri, Some(&member), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, Method::GET, &company_uri, Some(&member), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Acme Robotics");

    let (status, body) = call(&app, Method::GET, "/api/companies", Some(&member), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = call(
        &app,
        Method::PATCH,
        &member_uri,
        Some(&member),
        Some(json!({ "permission": "create" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(
        &app,
        Method::PATCH,
        &member_uri,
        Some(&owner),
        Some(json!({ "permission": "create" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["permission"], "create");

    let (status, body) = call(&app, Method::GET, &members_uri, Some(&member), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_safe_note_flow() {
    let app = test::init_service(HttpServer::create_app(web::Data::new(app_state().await))).await;
    let (_, founder) = register(&app, "founder@example.com").await;
    let (_, viewer) = register(&app, "viewer@example.com").await;
    let (angel_id, angel) = register(&app, "angel@example.com").await;
    let (_, other) = register(&app, "other@example.com").await;

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/companies",
        Some(&founder),
        Some(json!({ "name": "Startup" })),
    )
    .await;
    let startup_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/companies",
        Some(&angel),
        Some(json!({ "name": "Angel Fund" })),
    )
    .await;
    let fund_id = body["data"]["id"].as_str().unwrap().to_string();

    // A view-only team member cannot draft documents
    let (_, body) = call(
        &app,
        Method::POST,
        &format!("/api/companies/{}/members", startup_id),
        Some(&founder),
        Some(json!({ "email": "viewer@example.com", "permission": "view" })),
    )
    .await;
    let viewer_member_id = body["data"]["id"].as_str().unwrap().to_string();
    call(
        &app,
        Method::POST,
        &format!("/api/invites/{}/accept", viewer_member_id),
        Some(&viewer),
        None,
    )
    .await;

    let draft = json!({
        "kind": "safe_note",
        "senderCompanyId": startup_id,
        "amountCents": 25_000_000,
        "valuationCapCents": 800_000_000,
        "discountBps": 2_000,
    });
    let (status, _) = call(
        &app,
        Method::POST,
        "/api/documents",
        Some(&viewer),
        Some(draft.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, Method::POST, "/api/documents", Some(&founder), Some(draft)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "draft");
    let document_id = body["data"]["id"].as_str().unwrap().to_string();
    let document_uri = format!("/api/documents/{}", document_id);

    // The angel has no relationship with the startup yet
    let (status, _) = call(&app, Method::GET, &document_uri, Some(&angel), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, Method::GET, &document_uri, Some(&viewer), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("{}/send", document_uri),
        Some(&viewer),
        Some(json!({ "recipientEmail": "angel@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("{}/send", document_uri),
        Some(&founder),
        Some(json!({ "recipientEmail": "angel@example.com", "recipientCompanyId": fund_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "sent");
    assert_eq!(body["data"]["recipient_user_id"], angel_id);

    let (status, _) = call(&app, Method::GET, &document_uri, Some(&angel), None).await;
    assert_eq!(status, StatusCode::OK);

    // Strangers and company staff cannot sign on the recipient's behalf
    let (status, _) = call(&app, Method::POST, &format!("{}/sign", document_uri), Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(&app, Method::POST, &format!("{}/sign", document_uri), Some(&founder), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, Method::POST, &format!("{}/sign", document_uri), Some(&angel), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "signed");

    let (status, _) = call(&app, Method::POST, &format!("{}/cancel", document_uri), Some(&founder), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/documents?entrepreneurCompanyId={}", startup_id),
        Some(&founder),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 1);

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/documents?angelCompanyId={}", fund_id),
        Some(&angel),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 1);

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/documents?angelCompanyId={}", fund_id),
        Some(&founder),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_document_request_errors() {
    let app = test::init_service(HttpServer::create_app(web::Data::new(app_state().await))).await;
    let (_, founder) = register(&app, "founder@example.com").await;

    let (status, _) = call(
        &app,
        Method::GET,
        "/api/documents/not-a-uuid",
        Some(&founder),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/documents/{}", uuid::Uuid::new_v4()),
        Some(&founder),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::GET, "/api/documents", Some(&founder), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/documents",
        Some(&founder),
        Some(json!({
            "kind": "term_sheet",
            "senderCompanyId": uuid::Uuid::new_v4(),
            "amountCents": 100,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_outsider_cannot_reach_company_documents() {
    let app = test::init_service(HttpServer::create_app(web::Data::new(app_state().await))).await;
    let (_, founder) = register(&app, "founder@example.com").await;
    let (_, outsider) = register(&app, "outsider@example.com").await;

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/companies",
        Some(&founder),
        Some(json!({ "name": "Startup" })),
    )
    .await;
    let startup_id = body["data"]["id"].as_str().unwrap().to_string();
    let draft = json!({
        "kind": "safe_note",
        "senderCompanyId": startup_id,
        "amountCents": 2_500_000,
    });

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/documents",
        Some(&founder),
        Some(draft.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for uri in [
        format!("/api/documents?entrepreneurCompanyId={}", startup_id),
        format!("/api/documents?entrepreneur%43ompanyId={}", startup_id),
    ] {
        let (status, _) = call(&app, Method::GET, &uri, Some(&outsider), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
    }

    for content_type in ["Application/JSON", "application/merge-patch+json"] {
        let req = test::TestRequest::post()
            .uri("/api/documents")
            .insert_header(("Authorization", format!("Bearer {}", outsider)))
            .insert_header(("Content-Type", content_type))
            .set_payload(serde_json::to_vec(&draft).unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{}", content_type);
    }

    let (_, body) = call(
        &app,
        Method::GET,
        &format!("/api/documents?entrepreneurCompanyId={}", startup_id),
        Some(&founder),
        None,
    )
    .await;
    assert_eq!(body["meta"]["count"], 1);
}
