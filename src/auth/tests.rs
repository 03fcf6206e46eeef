//! Tests for the authentication system

use super::*;
use crate::config::AuthConfig;
use crate::storage::MemoryStore;
use crate::utils::error::GatewayError;
use std::sync::Arc;

fn auth_system() -> AuthSystem {
    let config = AuthConfig {
        jwt_secret: "Unit-Test-Secret-That-Is-Long-Enough-123".to_string(),
        jwt_expiration: 900,
        issuer: "safenote-test".to_string(),
    };
    AuthSystem::new(&config, Arc::new(MemoryStore::new()))
}

#[tokio::test]
async fn test_register_then_login() {
    let auth = auth_system();

    let registered = auth
        .register("Founder@Example.com", "s3cret-pass", Some("Ada".to_string()))
        .await
        .unwrap();
    assert_eq!(registered.user.email, "founder@example.com");
    assert_ne!(registered.user.password_hash, "s3cret-pass");

    let session = auth.login("founder@example.com", "s3cret-pass").await.unwrap();
    assert_eq!(session.user.id(), registered.user.id());
    assert!(session.user.last_login_at.is_some());

    let caller = auth
        .authenticate(AuthMethod::Jwt(session.tokens.access_token))
        .unwrap();
    assert_eq!(caller.user_id, registered.user.id());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let auth = auth_system();
    auth.register("a@example.com", "password-1", None).await.unwrap();

    let result = auth.register("A@example.com", "password-2", None).await;
    assert!(matches!(result, Err(GatewayError::Conflict(_))));
}

#[tokio::test]
async fn test_register_validation() {
    let auth = auth_system();

    let result = auth.register("not-an-email", "password-1", None).await;
    assert!(matches!(result, Err(GatewayError::Validation(_))));

    let result = auth.register("b@example.com", "short", None).await;
    assert!(matches!(result, Err(GatewayError::Validation(_))));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let auth = auth_system();
    auth.register("c@example.com", "password-1", None).await.unwrap();

    let result = auth.login("c@example.com", "password-2").await;
    assert!(matches!(result, Err(GatewayError::Auth(_))));

    let result = auth.login("nobody@example.com", "password-1").await;
    assert!(matches!(result, Err(GatewayError::Auth(_))));
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let auth = auth_system();
    let session = auth.register("d@example.com", "password-1", None).await.unwrap();

    let pair = auth.refresh(&session.tokens.refresh_token).await.unwrap();
    let caller = auth.authenticate(AuthMethod::Jwt(pair.access_token)).unwrap();
    assert_eq!(caller.user_id, session.user.id());

    // Access tokens cannot be used to refresh
    let result = auth.refresh(&session.tokens.access_token).await;
    assert!(matches!(result, Err(GatewayError::Auth(_))));
}

#[test]
fn test_authenticate_without_credentials() {
    let auth = auth_system();
    assert!(matches!(
        auth.authenticate(AuthMethod::None),
        Err(GatewayError::Auth(_))
    ));
    assert!(matches!(
        auth.authenticate(AuthMethod::Jwt("garbage".to_string())),
        Err(GatewayError::Auth(_))
    ));
}
