//! `IdentityVerifier` backed by a hosted identity provider.
//!
//! The provider exposes a "current user" endpoint: it is called with the
//! caller's bearer token and answers with the user that token belongs to.
//!
//! | provider answer                         | result                         |
//! |-----------------------------------------|--------------------------------|
//! | 2xx with a user object carrying an `id` | `Ok(Identity)`                 |
//! | 2xx with `null` or no usable `id`       | `Rejected(NoPrincipal)`        |
//! | 401 / 403 / 404                         | `Rejected(ProviderRejected)`   |
//! | any other status                        | `Unavailable(UpstreamStatus)`  |
//! | timeout / transport / undecodable body  | `Unavailable(..)`              |

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::config::identity::{IdentityConfig, CONNECT_TIMEOUT};
use crate::error::AppError;
use crate::errors::{RejectionKind, UnavailableKind, VerificationError};
use crate::identity::{BearerToken, Identity, IdentityVerifier};

/// Header carrying the provider's public API key
pub const API_KEY_HEADER: &str = "apikey";

/// Subset of the provider's user object the dashboard relies on
#[derive(Debug, Deserialize)]
struct ProviderUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Clone)]
pub struct RemoteIdentityVerifier {
    client: reqwest::Client,
    verify_url: Url,
    api_key: Option<String>,
}

impl RemoteIdentityVerifier {
    /// Build the verifier and its pooled HTTP client.
    pub fn new(config: &IdentityConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .build()
            .map_err(|e| AppError::config(format!("failed to build identity HTTP client: {e}")))?;

        Ok(Self {
            client,
            verify_url: config.verify_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl std::fmt::Debug for RemoteIdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteIdentityVerifier")
            .field("verify_url", &self.verify_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .finish()
    }
}

#[async_trait]
impl IdentityVerifier for RemoteIdentityVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<Identity, VerificationError> {
        let mut request = self
            .client
            .get(self.verify_url.clone())
            .bearer_auth(token.as_str());
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(http.status_code = status.as_u16(), "identity provider answered");

        if matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        ) {
            return Err(VerificationError::rejected(
                RejectionKind::ProviderRejected,
                format!("provider answered {status}"),
            ));
        }
        if !status.is_success() {
            return Err(VerificationError::unavailable(
                UnavailableKind::UpstreamStatus(status.as_u16()),
                format!("provider answered {status}"),
            ));
        }

        let user = response
            .json::<Option<ProviderUser>>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    transport_error(e)
                } else {
                    VerificationError::unavailable(
                        UnavailableKind::MalformedResponse,
                        format!("undecodable user payload: {e}"),
                    )
                }
            })?;

        identity_from(user)
    }
}

fn identity_from(user: Option<ProviderUser>) -> Result<Identity, VerificationError> {
    let user = user.ok_or_else(|| {
        VerificationError::rejected(RejectionKind::NoPrincipal, "provider returned no user")
    })?;

    let id = user
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            VerificationError::rejected(RejectionKind::NoPrincipal, "user payload has no id")
        })?;
    let phone = user.phone.filter(|p| !p.trim().is_empty());

    Ok(Identity::new(id, phone))
}

fn transport_error(e: reqwest::Error) -> VerificationError {
    // Strip the URL so provider query strings never reach logs
    let e = e.without_url();
    if e.is_timeout() {
        VerificationError::unavailable(UnavailableKind::Timeout, e.to_string())
    } else {
        VerificationError::unavailable(UnavailableKind::Transport, e.to_string())
    }
}
