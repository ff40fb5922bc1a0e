//! Settings for reaching the hosted identity provider.

use std::time::Duration;

use reqwest::Url;

use crate::error::AppError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const MAX_TIMEOUT_SECS: u64 = 60;
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Where and how the gate asks the provider about a bearer token.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Provider endpoint that returns the user owning the presented token
    pub verify_url: Url,
    /// Public API key sent as the `apikey` header, when the provider wants one
    pub api_key: Option<String>,
    /// Whole-request timeout for one verification call. Never retried.
    pub timeout: Duration,
}

impl IdentityConfig {
    pub fn new(verify_url: Url) -> Self {
        Self {
            verify_url,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse and validate the provider URL (http or https only)
pub fn parse_verify_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::config(format!("IDENTITY_VERIFY_URL is not a valid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::config(format!(
            "IDENTITY_VERIFY_URL must use http or https, got '{other}'"
        ))),
    }
}

/// Parse the timeout in whole seconds, bounded to 1..=MAX_TIMEOUT_SECS
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, AppError> {
    let secs = raw.trim().parse::<u64>().map_err(|_| {
        AppError::config(format!(
            "IDENTITY_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
        ))
    })?;

    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        return Err(AppError::config(format!(
            "IDENTITY_TIMEOUT_SECS must be between 1 and {MAX_TIMEOUT_SECS}, got {secs}"
        )));
    }

    Ok(Duration::from_secs(secs))
}
