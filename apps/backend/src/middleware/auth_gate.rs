//! Bearer-token authentication gate.
//!
//! Wraps protected scopes. For every request it extracts the bearer
//! credential from the `Authorization` header, asks the configured
//! `IdentityVerifier` who it belongs to, and either stores the resulting
//! `Identity` in request extensions and calls the inner service, or answers
//! the request itself:
//!
//! - no / malformed `Bearer` header → 401 "Authentication required"
//! - provider rejects the token     → 401 "Invalid or expired token"
//! - provider call fails            → 500 "Authentication error" (logged)
//! - no verifier in app state       → 500 "Authentication error" (logged)
//!
//! Nothing is cached: the provider is consulted on every request and a
//! failed call is never retried.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::error::AppError;
use crate::identity::{BearerToken, Identity};
use crate::logging::security;
use crate::state::app_state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let outcome = authenticate(&req).await;
            match outcome {
                Ok(identity) => {
                    // Only a verified identity ever reaches the extensions
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                // Render here, inside the request's trace scope
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<Identity, AppError> {
    let path = req.path();

    let token = match parse_bearer(req.headers().get(header::AUTHORIZATION)) {
        Some(token) => token,
        None => {
            security::auth_rejected("missing_or_malformed_bearer", path);
            return Err(AppError::authentication_required());
        }
    };

    let verifier = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state.verifier(),
        None => {
            let detail = "no identity verifier configured for this app";
            security::auth_fault(detail, path);
            return Err(AppError::authentication_fault(detail));
        }
    };

    match verifier.verify(&token).await {
        Ok(identity) => {
            security::auth_succeeded(&identity, path);
            Ok(identity)
        }
        Err(err) if err.is_rejection() => {
            security::auth_rejected("token_rejected_by_provider", path);
            Err(err.into())
        }
        Err(err) => {
            security::auth_fault(&err.to_string(), path);
            Err(err.into())
        }
    }
}

/// Extract the credential from an `Authorization: Bearer <token>` header.
///
/// The scheme must be exactly `Bearer ` (case-sensitive, one space).
/// Everything after it is the credential, passed on verbatim; an empty or
/// whitespace-only remainder counts as no credential.
pub fn parse_bearer(header_value: Option<&HeaderValue>) -> Option<BearerToken> {
    let raw = header_value?.to_str().ok()?;
    let token = raw.strip_prefix(BEARER_PREFIX)?;

    if token.trim().is_empty() {
        return None;
    }

    Some(BearerToken::new(token))
}
