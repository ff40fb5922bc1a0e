//! Verification error taxonomy.
//!
//! This error type is HTTP-agnostic. The gate converts it into
//! `crate::error::AppError` using the provided `From<VerificationError>`
//! implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::AppError;

/// Why the provider refused to resolve a credential
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RejectionKind {
    /// Provider answered 401/403/404 for the token
    ProviderRejected,
    /// Provider answered successfully but with no usable principal
    NoPrincipal,
}

/// Operational failures while talking to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnavailableKind {
    Timeout,
    Transport,
    UpstreamStatus(u16),
    MalformedResponse,
}

/// Outcome of a failed `IdentityVerifier::verify` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Credential is invalid, expired or unknown to the provider
    Rejected(RejectionKind, String),
    /// The provider could not be consulted
    Unavailable(UnavailableKind, String),
}

impl Display for VerificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            VerificationError::Rejected(kind, d) => write!(f, "credential rejected {kind:?}: {d}"),
            VerificationError::Unavailable(kind, d) => {
                write!(f, "identity provider unavailable {kind:?}: {d}")
            }
        }
    }
}

impl Error for VerificationError {}

impl VerificationError {
    pub fn rejected(kind: RejectionKind, detail: impl Into<String>) -> Self {
        Self::Rejected(kind, detail.into())
    }

    pub fn unavailable(kind: UnavailableKind, detail: impl Into<String>) -> Self {
        Self::Unavailable(kind, detail.into())
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, VerificationError::Rejected(..))
    }
}

impl From<VerificationError> for AppError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::Rejected(..) => AppError::invalid_token(),
            unavailable @ VerificationError::Unavailable(..) => {
                AppError::authentication_fault(unavailable.to_string())
            }
        }
    }
}
