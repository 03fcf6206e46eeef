//! Core JWT handler implementation

use super::types::{Claims, JwtHandler, TokenPair, TokenType};
use crate::config::AuthConfig;
use crate::utils::error::{GatewayError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

/// Refresh tokens outlive access tokens by this factor
const REFRESH_LIFETIME_FACTOR: u64 = 24;

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: config.issuer.clone(),
        }
    }

    fn issue(&self, user_id: Uuid, token_type: TokenType, lifetime: u64) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| GatewayError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + lifetime,
            iss: self.issuer.clone(),
            aud: token_type.audience().to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(GatewayError::Jwt)?;

        debug!("Created {:?} token for user: {}", token_type, user_id);
        Ok(token)
    }

    /// Create an access token for a user
    pub fn create_access_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, TokenType::Access, self.expiration)
    }

    /// Create a refresh token for a user
    pub fn create_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(
            user_id,
            TokenType::Refresh,
            self.expiration * REFRESH_LIFETIME_FACTOR,
        )
    }

    /// Create a token pair (access + refresh)
    pub fn create_token_pair(&self, user_id: Uuid) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(user_id)?,
            refresh_token: self.create_refresh_token(user_id)?,
            token_type: "Bearer".to_string(),
            expires_in: self.expiration,
        })
    }

    /// Verify and decode a token of the given type
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[expected.audience()]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            GatewayError::Jwt(e)
        })?;

        if token_data.claims.token_type != expected {
            return Err(GatewayError::auth("Invalid token type"));
        }

        debug!("Token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Verify an access token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        self.verify(token, TokenType::Access)
    }

    /// Verify a refresh token and return user ID
    pub fn verify_refresh_token(&self, token: &str) -> Result<Uuid> {
        Ok(self.verify(token, TokenType::Refresh)?.sub)
    }

    /// Extract the token from a `Bearer` authorization header
    pub fn extract_token_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Access token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.expiration
    }
}
