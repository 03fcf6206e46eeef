//! Helper functions for middleware

use crate::auth::AuthMethod;
use crate::auth::jwt::JwtHandler;
use crate::utils::error::{GatewayError, Result};
use actix_web::http::header::{self, HeaderMap};
use actix_web::web;
use serde::Deserialize;
use uuid::Uuid;

/// Query parameters that may name the company a listing is scoped to
pub const COMPANY_QUERY_PARAMS: [&str; 2] = ["angelCompanyId", "entrepreneurCompanyId"];

/// Body field naming the issuing company of a new document
pub const SENDER_COMPANY_FIELD: &str = "senderCompanyId";

/// Extract authentication method from headers
pub fn extract_auth_method(headers: &HeaderMap) -> AuthMethod {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(JwtHandler::extract_token_from_header)
        .map(|token| AuthMethod::Jwt(token.to_string()))
        .unwrap_or(AuthMethod::None)
}

/// Check if a route is public (doesn't require authentication)
pub fn is_public_route(path: &str) -> bool {
    const PUBLIC_ROUTES: &[&str] = &["/health", "/auth/login", "/auth/register", "/auth/refresh"];

    PUBLIC_ROUTES
        .iter()
        .any(|&route| path == route || path.starts_with(&format!("{}/", route)))
}

/// Parse an identifier taken from a path, body or query
pub fn parse_id(name: &str, raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| GatewayError::bad_request(format!("Invalid {}: expected a UUID", name)))
}

/// Query parameters that may name the company a listing is scoped to
///
/// Decoded with `web::Query`, as the listing handler decodes its own query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuery {
    /// Company receiving documents
    pub angel_company_id: Option<String>,
    /// Company issuing documents
    pub entrepreneur_company_id: Option<String>,
}

/// Company named by the query string, checked in [`COMPANY_QUERY_PARAMS`] order
pub fn company_from_query(query: &str) -> Result<Option<Uuid>> {
    let params = web::Query::<CompanyQuery>::from_query(query)
        .map_err(|e| GatewayError::bad_request(format!("Invalid query string: {}", e)))?
        .into_inner();

    let [angel, entrepreneur] = COMPANY_QUERY_PARAMS;
    if let Some(raw) = params.angel_company_id {
        return parse_id(angel, &raw).map(Some);
    }
    if let Some(raw) = params.entrepreneur_company_id {
        return parse_id(entrepreneur, &raw).map(Some);
    }
    Ok(None)
}

/// Company named by the `senderCompanyId` field of a JSON body
///
/// An empty body or a JSON value without the field names no company. Any
/// other body must be JSON whatever its declared content type.
pub fn company_from_body(body: &[u8]) -> Result<Option<Uuid>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value = serde_json::from_slice::<serde_json::Value>(body)
        .map_err(|e| GatewayError::bad_request(format!("Request body must be JSON: {}", e)))?;

    match value.get(SENDER_COMPANY_FIELD) {
        Some(serde_json::Value::String(raw)) => parse_id(SENDER_COMPANY_FIELD, raw).map(Some),
        Some(serde_json::Value::Null) | None => Ok(None),
        Some(_) => Err(GatewayError::bad_request(format!(
            "Invalid {}: expected a UUID",
            SENDER_COMPANY_FIELD
        ))),
    }
}
