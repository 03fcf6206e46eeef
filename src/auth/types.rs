//! Authentication types

use crate::auth::jwt::TokenPair;
use crate::core::models::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authentication method carried by a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// JWT bearer token
    Jwt(String),
    /// No authentication
    None,
}

/// Caller identity stored in request extensions by the auth middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Authenticated user ID
    pub user_id: Uuid,
}

/// Result of a successful registration or login
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// Authenticated user
    pub user: User,
    /// Issued tokens
    pub tokens: TokenPair,
}
