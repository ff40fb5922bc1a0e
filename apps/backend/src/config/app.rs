//! Centralized application configuration loaded from environment variables.

use std::env;

use reqwest::Url;

use crate::config::identity::{parse_timeout_secs, parse_verify_url, IdentityConfig};
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

/// Centralized application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Identity provider configuration
    pub identity: IdentityConfig,

    // CORS configuration (already validated, never empty)
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Server configuration
        let host = var("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        // Identity provider configuration
        let verify_url = var("IDENTITY_VERIFY_URL")
            .ok_or_else(|| AppError::config("IDENTITY_VERIFY_URL must be set"))?;
        let mut identity = IdentityConfig::new(parse_verify_url(&verify_url)?);
        if let Some(api_key) = var("IDENTITY_API_KEY") {
            identity = identity.with_api_key(api_key.trim());
        }
        if let Some(raw) = var("IDENTITY_TIMEOUT_SECS") {
            identity = identity.with_timeout(parse_timeout_secs(&raw)?);
        }

        let cors_allowed_origins =
            parse_allowed_origins(&var("CORS_ALLOWED_ORIGINS").unwrap_or_default())?;

        Ok(Self {
            host,
            port,
            identity,
            cors_allowed_origins,
        })
    }
}

/// Parse comma-separated origins, e.g.
/// CORS_ALLOWED_ORIGINS=http://localhost:3000,https://admin.example.org
///
/// Each entry must be a bare http(s) origin; a trailing `/` is tolerated and
/// normalised away. Empty entries are skipped. Falls back to localhost-only
/// when the variable is unset.
pub fn parse_allowed_origins(raw: &str) -> Result<Vec<String>, AppError> {
    let allowed = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_origin)
        .collect::<Result<Vec<_>, _>>()?;

    if allowed.is_empty() {
        Ok(vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ])
    } else {
        Ok(allowed)
    }
}

fn parse_origin(entry: &str) -> Result<String, AppError> {
    let invalid = |reason: &str| {
        AppError::config(format!(
            "CORS_ALLOWED_ORIGINS entry '{entry}' is not a valid origin: {reason}"
        ))
    };

    let url = Url::parse(entry).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("credentials are not allowed"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a path, query or fragment"));
    }

    Ok(url.origin().ascii_serialization())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = config_from(&[("IDENTITY_VERIFY_URL", "https://auth.example.test/auth/v1/user")])
            .unwrap();

        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 3001);
        assert_eq!(
            cfg.identity.verify_url.as_str(),
            "https://auth.example.test/auth/v1/user"
        );
        assert!(cfg.identity.api_key.is_none());
        assert_eq!(cfg.identity.timeout, Duration::from_secs(5));
        assert_eq!(
            cfg.cors_allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }

    #[test]
    fn full_config_is_parsed() {
        let cfg = config_from(&[
            ("BACKEND_HOST", "127.0.0.1"),
            ("BACKEND_PORT", "8080"),
            ("IDENTITY_VERIFY_URL", "http://localhost:54321/auth/v1/user"),
            ("IDENTITY_API_KEY", " anon-key "),
            ("IDENTITY_TIMEOUT_SECS", "10"),
            (
                "CORS_ALLOWED_ORIGINS",
                "https://admin.example.org/, http://localhost:5173,",
            ),
        ])
        .unwrap();

        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.identity.api_key.as_deref(), Some("anon-key"));
        assert_eq!(cfg.identity.timeout, Duration::from_secs(10));
        assert_eq!(
            cfg.cors_allowed_origins,
            vec!["https://admin.example.org", "http://localhost:5173"]
        );
    }

    #[test]
    fn missing_verify_url_is_a_config_error() {
        let err = config_from(&[]).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("IDENTITY_VERIFY_URL"));

        // Blank counts as unset
        assert!(config_from(&[("IDENTITY_VERIFY_URL", "  ")]).is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let base = ("IDENTITY_VERIFY_URL", "https://auth.example.test/user");

        assert!(config_from(&[base, ("BACKEND_PORT", "70000")]).is_err());
        assert!(config_from(&[base, ("IDENTITY_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("IDENTITY_VERIFY_URL", "mailto:ops@example.test")]).is_err());
    }

    #[test]
    fn malformed_cors_origins_are_config_errors() {
        for raw in [
            "http://bad host.example",
            "null",
            "ftp://files.example.org",
            "https://admin.example.org/dashboard",
            "https://admin.example.org?x=1",
            "https://user:pw@admin.example.org",
            "admin.example.org",
            "https://admin.example.org, *",
        ] {
            let err = parse_allowed_origins(raw).unwrap_err();
            assert!(matches!(err, AppError::Config { .. }), "{raw}");
            assert!(err.to_string().contains("CORS_ALLOWED_ORIGINS"), "{raw}");
        }

        let base = ("IDENTITY_VERIFY_URL", "https://auth.example.test/user");
        assert!(config_from(&[base, ("CORS_ALLOWED_ORIGINS", "http://bad host.example")]).is_err());
    }

    #[test]
    fn cors_origins_are_normalised() {
        assert_eq!(
            parse_allowed_origins("HTTPS://Admin.Example.org:443/, http://localhost:3000").unwrap(),
            vec!["https://admin.example.org", "http://localhost:3000"]
        );
        assert_eq!(
            parse_allowed_origins(" , ").unwrap(),
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }
}
