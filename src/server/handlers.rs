//! HTTP route handlers
//!
//! This module provides HTTP route handler functions.

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::StorageHealthStatus;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::debug;

/// Health check response body
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// `healthy` or `degraded`
    pub status: &'static str,
    /// Check time
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Server version
    pub version: &'static str,
    /// Storage backend status
    pub storage: StorageHealthStatus,
}

/// Health check endpoint handler
pub async fn health_check(state: web::Data<AppState>) -> crate::utils::error::Result<HttpResponse> {
    debug!("Health check requested");

    let storage = state.storage.health_check().await?;
    let healthy = storage.overall;
    let body = ApiResponse::success(HealthStatus {
        status: if healthy { "healthy" } else { "degraded" },
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        storage,
    });

    Ok(if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    })
}
