use std::fmt;
use std::sync::Arc;

use crate::identity::IdentityVerifier;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Verification port consulted by the auth gate on every request
    verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { verifier }
    }

    pub fn verifier(&self) -> Arc<dyn IdentityVerifier> {
        Arc::clone(&self.verifier)
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
