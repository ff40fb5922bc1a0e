use std::sync::Arc;

use crate::config::IdentityConfig;
use crate::error::AppError;
use crate::identity::{IdentityVerifier, RemoteIdentityVerifier};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    verifier: Option<Arc<dyn IdentityVerifier>>,
    identity_config: Option<IdentityConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already-built verifier. Takes precedence over `with_identity_config`.
    pub fn with_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Build a `RemoteIdentityVerifier` from provider settings.
    pub fn with_identity_config(mut self, config: IdentityConfig) -> Self {
        self.identity_config = Some(config);
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let verifier = match (self.verifier, self.identity_config) {
            (Some(verifier), _) => verifier,
            (None, Some(config)) => Arc::new(RemoteIdentityVerifier::new(&config)?),
            (None, None) => {
                return Err(AppError::config(
                    "no identity verifier configured for AppState",
                ))
            }
        };

        Ok(AppState::new(verifier))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::identity::parse_verify_url;

    #[test]
    fn build_fails_without_verifier() {
        let err = build_state().build().unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[tokio::test]
    async fn build_from_identity_config() {
        let config = IdentityConfig::new(
            parse_verify_url("http://127.0.0.1:9/auth/v1/user").unwrap(),
        );
        assert!(build_state().with_identity_config(config).build().is_ok());
    }
}
