//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! against the token service, and injects an `AuthContext` into the
//! request extensions for handlers to pick up.

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ErrorUnauthorized;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};
use uuid::Uuid;

use cd_core::domain::entities::account::Role;
use cd_core::domain::entities::token::Claims;
use cd_core::services::token::TokenService;

/// Authentication context injected into requests behind `JwtAuth`
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account ID extracted from JWT claims
    pub account_id: Uuid,
    /// Role the token was minted for
    pub role: Role,
    /// JWT ID for tracing
    pub jti: String,
}

impl AuthContext {
    /// Creates an authentication context from verified claims
    fn from_claims(claims: Claims) -> Option<Self> {
        Some(Self {
            account_id: claims.account_id().ok()?,
            role: claims.account_role()?,
            jti: claims.jti,
        })
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let context = req.extensions().get::<AuthContext>().cloned();
        ready(context.ok_or_else(|| ErrorUnauthorized("Authentication required")))
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    /// Creates a new JWT authentication middleware around a token service
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let token = extract_bearer_token(&req)
                .ok_or_else(|| ErrorUnauthorized("Missing or invalid Authorization header"))?;

            let claims = token_service
                .verify_token(&token)
                .map_err(|_| ErrorUnauthorized("Token verification failed"))?;

            let context = AuthContext::from_claims(claims)
                .ok_or_else(|| ErrorUnauthorized("Invalid token claims"))?;

            req.extensions_mut().insert(context);
            service.call(req).await
        })
    }
}

/// Extracts the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
