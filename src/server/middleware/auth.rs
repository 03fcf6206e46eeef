//! Authentication middleware

use crate::auth::AuthenticatedUser;
use crate::server::AppState;
use crate::server::middleware::helpers::{extract_auth_method, is_public_route};
use crate::utils::error::GatewayError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, HttpRequest, ResponseError, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

/// Auth middleware for Actix-web
///
/// Verifies the bearer token of every non-public request and stores the
/// caller as [`AuthenticatedUser`] in the request extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_route(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            let error = GatewayError::internal("Application state not configured");
            return Box::pin(async move { Ok(reject(req, error)) });
        };

        match state.auth.authenticate(extract_auth_method(req.headers())) {
            Ok(user) => {
                debug!(user_id = %user.user_id, "Request authenticated");
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(e) => {
                warn!(path = %req.path(), "Rejected unauthenticated request: {}", e);
                Box::pin(async move { Ok(reject(req, e)) })
            }
        }
    }
}

/// Turn an error into the response of a short-circuited request
pub(crate) fn reject<B>(req: ServiceRequest, error: GatewayError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(error.error_response())
        .map_into_right_body()
}

/// Caller stored by [`AuthMiddleware`]
pub fn get_authenticated_user(req: &HttpRequest) -> Result<AuthenticatedUser, GatewayError> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .copied()
        .ok_or_else(|| GatewayError::auth("Authentication required"))
}

impl actix_web::FromRequest for AuthenticatedUser {
    type Error = GatewayError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(get_authenticated_user(req))
    }
}
