//! Values that cross the verification port.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Principal resolved by the identity provider for one request.
///
/// Inserted into request extensions by the `AuthGate` middleware and read
/// back by the `CurrentIdentity` extractor. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned user identifier
    pub external_user_id: String,
    /// Contact attribute reported by the provider, if the user has one
    pub phone: Option<String>,
}

impl Identity {
    pub fn new(external_user_id: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            external_user_id: external_user_id.into(),
            phone,
        }
    }
}

/// Opaque credential taken from `Authorization: Bearer <token>`.
///
/// The token is never parsed locally. `Debug` hides the value so the
/// credential cannot end up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let token = BearerToken::new("eyJhbGciOiJIUzI1NiJ9.payload.sig");
        let rendered = format!("{token:?}");
        assert_eq!(rendered, "BearerToken(<redacted>)");
        assert!(!rendered.contains("eyJ"));
        assert_eq!(token.as_str(), "eyJhbGciOiJIUzI1NiJ9.payload.sig");
    }

    #[test]
    fn identity_serializes_with_fixed_field_names() {
        let identity = Identity::new("user-123", Some("+15551234567".to_string()));
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "external_user_id": "user-123", "phone": "+15551234567" })
        );

        let no_phone = serde_json::to_value(Identity::new("user-456", None)).unwrap();
        assert_eq!(
            no_phone,
            serde_json::json!({ "external_user_id": "user-456", "phone": null })
        );
    }
}
