use tracing::{debug, error, warn};

use crate::identity::Identity;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a rejected authentication attempt (missing, malformed or refused credential).
pub fn auth_rejected(reason: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        reason,
        path,
        "Authentication rejected"
    );
}

/// Log a failed call to the identity provider.
pub fn auth_fault(detail: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    error!(
        event = "SECURITY_AUTH_FAULT",
        %trace_id,
        detail = %Redacted(detail),
        path,
        "Identity provider call failed"
    );
}

/// Log a successfully resolved identity.
pub fn auth_succeeded(identity: &Identity, path: &str) {
    let trace_id = trace_ctx::trace_id();

    debug!(
        event = "AUTH_IDENTITY_RESOLVED",
        %trace_id,
        external_user_id = %identity.external_user_id,
        phone = %identity.phone.as_deref().map(Redacted).unwrap_or(Redacted("")),
        path,
        "Identity resolved"
    );
}
