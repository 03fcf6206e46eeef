//! Company access guard middleware
//!
//! Wraps a route with a [`RouteRequirement`]. The guard resolves the company
//! the request acts on, asks the [`AccessEvaluator`](crate::auth::access::AccessEvaluator)
//! for a decision and either forwards the request or answers it with 403.

use crate::auth::access::AccessRequest;
use crate::core::models::{Permission, Role};
use crate::server::AppState;
use crate::server::middleware::auth::{get_authenticated_user, reject};
use crate::server::middleware::helpers::{company_from_body, company_from_query, parse_id};
use crate::utils::error::GatewayError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::web;
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Path parameter naming a company
pub const COMPANY_PATH_PARAM: &str = "company_id";

/// Path parameter naming a document
pub const DOCUMENT_PATH_PARAM: &str = "document_id";

/// How a guarded route names its company
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardScope {
    /// `company_id` path parameter, else the `senderCompanyId` body field,
    /// else the `angelCompanyId` / `entrepreneurCompanyId` query parameters
    Company,
    /// `document_id` path parameter, resolved to the issuing company
    Document,
}

/// Access requirement declared when a route is registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequirement {
    /// Accepted roles, empty for any authenticated non-declined user
    pub roles: Vec<Role>,
    /// Accepted team member permissions, empty when the role suffices
    pub permissions: Vec<Permission>,
    /// Where the company comes from
    pub scope: GuardScope,
}

impl RouteRequirement {
    /// Requirement on a company-scoped route
    pub fn company(roles: &[Role], permissions: &[Permission]) -> Self {
        Self {
            roles: roles.to_vec(),
            permissions: permissions.to_vec(),
            scope: GuardScope::Company,
        }
    }

    /// Requirement on a document-scoped route
    pub fn document(roles: &[Role], permissions: &[Permission]) -> Self {
        Self {
            roles: roles.to_vec(),
            permissions: permissions.to_vec(),
            scope: GuardScope::Document,
        }
    }
}

/// Company access guard for Actix-web
pub struct CompanyGuard {
    requirement: Rc<RouteRequirement>,
}

impl CompanyGuard {
    /// Guard a route with `requirement`
    pub fn new(requirement: RouteRequirement) -> Self {
        Self {
            requirement: Rc::new(requirement),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CompanyGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = CompanyGuardService<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CompanyGuardService {
            service: Rc::new(service),
            requirement: self.requirement.clone(),
        }))
    }
}

/// Service implementation for the company guard
pub struct CompanyGuardService<S> {
    service: Rc<S>,
    requirement: Rc<RouteRequirement>,
}

impl<S, B> Service<ServiceRequest> for CompanyGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let requirement = self.requirement.clone();

        Box::pin(async move {
            let caller = match get_authenticated_user(req.request()) {
                Ok(caller) => caller,
                Err(e) => return Ok(reject(req, e)),
            };

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                return Ok(reject(
                    req,
                    GatewayError::internal("Application state not configured"),
                ));
            };

            let company_id = match resolve_company(&mut req, &state, requirement.scope).await {
                Ok(company_id) => company_id,
                Err(e) => return Ok(reject(req, e)),
            };

            let access = AccessRequest {
                company_id,
                user_id: caller.user_id,
                required_roles: requirement.roles.clone(),
                required_permissions: requirement.permissions.clone(),
            };

            match state.evaluator.check(&access).await {
                Ok(decision) if decision.granted => {
                    debug!(
                        path = %req.path(),
                        user_id = %caller.user_id,
                        reason = ?decision.reason,
                        "Access granted"
                    );
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Ok(decision) => {
                    warn!(
                        path = %req.path(),
                        user_id = %caller.user_id,
                        company_id = ?company_id,
                        reason = ?decision.reason,
                        "Access denied"
                    );
                    Ok(reject(
                        req,
                        GatewayError::forbidden("You do not have access to this resource"),
                    ))
                }
                Err(e) => {
                    error!(path = %req.path(), "Access evaluation failed: {}", e);
                    Ok(reject(req, e))
                }
            }
        })
    }
}

/// Company the request acts on, `None` when it names none
async fn resolve_company(
    req: &mut ServiceRequest,
    state: &AppState,
    scope: GuardScope,
) -> crate::utils::error::Result<Option<Uuid>> {
    match scope {
        GuardScope::Document => {
            let Some(raw) = req.match_info().get(DOCUMENT_PATH_PARAM) else {
                return Ok(None);
            };
            let document_id = parse_id(DOCUMENT_PATH_PARAM, raw)?;

            // A missing document is left to the handler's 404
            let document = state.storage.documents().get_document(document_id).await?;
            Ok(document.map(|d| d.sender_company_id))
        }
        GuardScope::Company => {
            if let Some(raw) = req.match_info().get(COMPANY_PATH_PARAM) {
                return parse_id(COMPANY_PATH_PARAM, raw).map(Some);
            }

            // Body is read whatever the declared content type
            let body = read_body(req).await?;
            if let Some(company_id) = company_from_body(&body)? {
                return Ok(Some(company_id));
            }

            company_from_query(req.query_string())
        }
    }
}

/// Read the request body and put it back for the handler
async fn read_body(req: &mut ServiceRequest) -> crate::utils::error::Result<web::Bytes> {
    let body = req
        .extract::<web::Bytes>()
        .await
        .map_err(|e| GatewayError::bad_request(format!("Failed to read request body: {}", e)))?;

    let (_, mut payload) = actix_http::h1::Payload::create(true);
    payload.unread_data(body.clone());
    req.set_payload(payload.into());

    Ok(body)
}
