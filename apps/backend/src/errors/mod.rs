//! Error handling for the dashboard backend.

pub mod domain;

pub use domain::{RejectionKind, UnavailableKind, VerificationError};
