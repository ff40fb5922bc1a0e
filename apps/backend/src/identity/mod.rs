//! Identity verification port.
//!
//! The request gate never verifies credentials itself. It hands the bearer
//! token to an [`IdentityVerifier`] and acts on the result, so the hosted
//! provider can be swapped without touching the gate's control flow.

pub mod model;
pub mod remote;

use async_trait::async_trait;

pub use model::{BearerToken, Identity};
pub use remote::RemoteIdentityVerifier;

use crate::errors::VerificationError;

/// Resolves a bearer credential into the principal it belongs to.
///
/// Implementations are consulted on every request; they must not cache
/// outcomes across calls.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &BearerToken) -> Result<Identity, VerificationError>;
}
