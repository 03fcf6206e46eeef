//! Account routes

use crate::auth::AuthenticatedUser;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;

/// Registration request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Optional display name
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token issued at login
    pub refresh_token: String,
}

/// `POST /auth/register`
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let session = state
        .auth
        .register(&request.email, &request.password, request.display_name)
        .await?;

    info!(user_id = %session.user.id(), "User registered");
    Ok(HttpResponse::Created().json(ApiResponse::success(session)))
}

/// `POST /auth/login`
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let session = state.auth.login(&request.email, &request.password).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(session)))
}

/// `POST /auth/refresh`
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    let tokens = state.auth.refresh(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tokens)))
}

/// `GET /api/me`
pub async fn me(state: web::Data<AppState>, caller: AuthenticatedUser) -> Result<HttpResponse> {
    let user = state.auth.current_user(caller).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}
