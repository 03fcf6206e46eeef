//! Core authentication system implementation

use super::jwt::{JwtHandler, TokenPair};
use super::password::{hash_password, validate_password, verify_password};
use super::types::{AuthMethod, AuthSession, AuthenticatedUser};
use crate::config::AuthConfig;
use crate::core::models::User;
use crate::storage::Store;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    /// JWT handler
    jwt: Arc<JwtHandler>,
    /// User store
    store: Arc<dyn Store>,
}

impl std::fmt::Debug for AuthSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSystem")
            .field("jwt", &self.jwt)
            .finish_non_exhaustive()
    }
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, store: Arc<dyn Store>) -> Self {
        info!("Initializing authentication system");

        Self {
            jwt: Arc::new(JwtHandler::new(config)),
            store,
        }
    }

    /// JWT handler
    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Authenticate a request
    pub fn authenticate(&self, auth_method: AuthMethod) -> Result<AuthenticatedUser> {
        match auth_method {
            AuthMethod::Jwt(token) => {
                let claims = self
                    .jwt
                    .verify_access_token(&token)
                    .map_err(|_| GatewayError::auth("Invalid or expired token"))?;
                Ok(AuthenticatedUser {
                    user_id: claims.sub,
                })
            }
            AuthMethod::None => Err(GatewayError::auth("No authentication provided")),
        }
    }

    /// Register a new user and issue tokens
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<AuthSession> {
        let email = normalize_email(email)?;
        validate_password(password)?;
        info!("Registering user: {}", email);

        let user = User::new(email, display_name, hash_password(password)?);
        self.store.insert_user(&user).await?;

        let tokens = self.jwt.create_token_pair(user.id())?;
        Ok(AuthSession { user, tokens })
    }

    /// Verify credentials and issue tokens
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = normalize_email(email)?;
        debug!("User login attempt: {}", email);

        let Some(mut user) = self.store.find_user_by_email(&email).await? else {
            warn!("Login failed for unknown email");
            return Err(GatewayError::auth("Invalid email or password"));
        };

        if !verify_password(password, &user.password_hash)? {
            warn!("Login failed for user: {}", user.id());
            return Err(GatewayError::auth("Invalid email or password"));
        }

        self.store.update_user_last_login(user.id()).await?;
        user.last_login_at = Some(chrono::Utc::now());

        let tokens = self.jwt.create_token_pair(user.id())?;
        info!("User logged in successfully: {}", user.id());
        Ok(AuthSession { user, tokens })
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let user_id = self
            .jwt
            .verify_refresh_token(refresh_token)
            .map_err(|_| GatewayError::auth("Invalid or expired refresh token"))?;

        if self.store.find_user_by_id(user_id).await?.is_none() {
            return Err(GatewayError::auth("User no longer exists"));
        }

        self.jwt.create_token_pair(user_id)
    }

    /// Load the authenticated user's account
    pub async fn current_user(&self, caller: AuthenticatedUser) -> Result<User> {
        self.store
            .find_user_by_id(caller.user_id)
            .await?
            .ok_or_else(|| GatewayError::not_found("User not found"))
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

    if !valid {
        return Err(GatewayError::validation("Invalid email address"));
    }
    Ok(email)
}
