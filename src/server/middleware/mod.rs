//! HTTP middleware implementations
//!
//! - [`AuthMiddleware`] authenticates every non-public request.
//! - [`CompanyGuard`] enforces a [`RouteRequirement`] on one route.

mod auth;
mod guard;
mod helpers;


pub use auth::{AuthMiddleware, AuthMiddlewareService, get_authenticated_user};
pub use guard::{
    COMPANY_PATH_PARAM, CompanyGuard, CompanyGuardService, DOCUMENT_PATH_PARAM, GuardScope,
    RouteRequirement,
};
pub use helpers::{
    COMPANY_QUERY_PARAMS, CompanyQuery, SENDER_COMPANY_FIELD, company_from_body, company_from_query,
    extract_auth_method, is_public_route, parse_id,
};
