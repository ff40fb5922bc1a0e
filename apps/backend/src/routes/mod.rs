use actix_web::web;

use crate::middleware::AuthGate;

pub mod me;

/// Production route table.
///
/// Everything under `/api` sits behind the `AuthGate`; `/health` stays public.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes).service(
        web::scope("/api")
            .wrap(AuthGate)
            .configure(me::configure_routes),
    );
}
