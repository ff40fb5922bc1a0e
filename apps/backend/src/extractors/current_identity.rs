use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::identity::Identity;

/// Identity of the caller, as resolved by the `AuthGate` middleware.
///
/// Reads the `Identity` the gate stored in request extensions. A handler
/// mounted outside a gated scope gets 401 "Authentication required".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentIdentity(pub Identity);

impl FromRequest for CurrentIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(AppError::authentication_required);

        ready(identity)
    }
}
