#![allow(dead_code)]

// tests/common/mod.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error as ActixError};
use async_trait::async_trait;
use dashboard_backend::errors::{RejectionKind, UnavailableKind, VerificationError};
use dashboard_backend::identity::{BearerToken, Identity, IdentityVerifier};
use dashboard_backend::middleware::RequestTrace;
use dashboard_backend::state::AppState;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const VALID_TOKEN: &str = "valid-token-abc";
pub const REJECTED_TOKEN: &str = "expired-token-xyz";
pub const FAULTING_TOKEN: &str = "token-while-provider-down";

/// In-process identity oracle with scripted answers per token.
///
/// Unknown tokens are rejected as having no principal. Every call is
/// recorded so tests can assert whether (and with what) the gate consulted it.
#[derive(Default)]
pub struct ScriptedVerifier {
    answers: HashMap<String, Result<Identity, VerificationError>>,
    calls: AtomicUsize,
    seen_tokens: Mutex<Vec<String>>,
}

impl ScriptedVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(mut self, token: &str, identity: Identity) -> Self {
        self.answers.insert(token.to_string(), Ok(identity));
        self
    }

    pub fn reject(mut self, token: &str) -> Self {
        self.answers.insert(
            token.to_string(),
            Err(VerificationError::rejected(
                RejectionKind::ProviderRejected,
                "token expired",
            )),
        );
        self
    }

    pub fn fail(mut self, token: &str, detail: &str) -> Self {
        self.answers.insert(
            token.to_string(),
            Err(VerificationError::unavailable(
                UnavailableKind::Transport,
                detail,
            )),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_tokens(&self) -> Vec<String> {
        self.seen_tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityVerifier for ScriptedVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<Identity, VerificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_tokens
            .lock()
            .unwrap()
            .push(token.as_str().to_string());

        self.answers
            .get(token.as_str())
            .cloned()
            .unwrap_or_else(|| {
                Err(VerificationError::rejected(
                    RejectionKind::NoPrincipal,
                    "unknown token",
                ))
            })
    }
}

pub fn alice() -> Identity {
    Identity::new("ext-user-alice", Some("+15551234567".to_string()))
}

/// Verifier used by most gate tests: one valid, one rejected, one faulting token
pub fn standard_verifier() -> Arc<ScriptedVerifier> {
    Arc::new(
        ScriptedVerifier::new()
            .accept(VALID_TOKEN, alice())
            .reject(REJECTED_TOKEN)
            .fail(FAULTING_TOKEN, "connection reset by peer"),
    )
}

pub fn state_with(verifier: Arc<ScriptedVerifier>) -> AppState {
    AppState::new(verifier)
}

/// Initialize the production route table behind `RequestTrace`.
pub async fn init_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError> {
    test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(dashboard_backend::routes::configure),
    )
    .await
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
