use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::CurrentIdentity;

/// Returns the identity the gate resolved for the caller.
async fn me(CurrentIdentity(identity): CurrentIdentity) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(identity))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(me));
}
