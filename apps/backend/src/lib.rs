#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod identity;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{Config, IdentityConfig};
pub use error::{AppError, ErrorBody};
pub use errors::{RejectionKind, UnavailableKind, VerificationError};
pub use extractors::CurrentIdentity;
pub use identity::{BearerToken, Identity, IdentityVerifier, RemoteIdentityVerifier};
pub use middleware::{
    cors_middleware, AuthGate, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
pub use state::{build_state, AppState};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
