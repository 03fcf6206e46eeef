//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod auth;
pub mod companies;
pub mod documents;
pub mod invites;

use crate::core::models::{Permission, Role};
use actix_web::web;

/// Roles that act for a company
pub(crate) const COMPANY_STAFF: &[Role] = &[Role::Owner, Role::TeamMember];

/// Tiers accepted on read routes
pub(crate) const READ: &[Permission] = &[Permission::View, Permission::Edit];

/// Tiers accepted on routes that change existing records
pub(crate) const WRITE: &[Permission] = &[Permission::Edit, Permission::Create];

/// Tiers accepted on routes that create records
pub(crate) const CREATE: &[Permission] = &[Permission::Create];

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: None,
        }
    }

    /// Create a successful response with metadata
    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: Some(meta),
        }
    }
}

/// Register every route below `/auth` and `/api`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/refresh", web::post().to(auth::refresh)),
    )
    .service(
        web::scope("/api")
            .route("/me", web::get().to(auth::me))
            .configure(companies::configure)
            .configure(invites::configure)
            .configure(documents::configure),
    );
}
