mod common;

use std::time::Duration;

use dashboard_backend::{AppError, Config};

const VARS: [&str; 6] = [
    "BACKEND_HOST",
    "BACKEND_PORT",
    "IDENTITY_VERIFY_URL",
    "IDENTITY_API_KEY",
    "IDENTITY_TIMEOUT_SECS",
    "CORS_ALLOWED_ORIGINS",
];

/// Run `f` with exactly `vars` set among the backend's variables,
/// restoring the previous environment afterwards.
fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let saved: Vec<(&str, Option<String>)> =
        VARS.iter().map(|k| (*k, std::env::var(k).ok())).collect();

    for key in VARS {
        std::env::remove_var(key);
    }
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    f();

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}

#[test]
#[serial_test::serial]
fn test_from_env_reads_identity_settings() {
    with_env(
        &[
            ("IDENTITY_VERIFY_URL", "https://project.auth.example.test/auth/v1/user"),
            ("IDENTITY_API_KEY", "anon-public-key"),
            ("IDENTITY_TIMEOUT_SECS", "3"),
            ("BACKEND_PORT", "4000"),
        ],
        || {
            let cfg = Config::from_env().expect("config should load");
            assert_eq!(cfg.port, 4000);
            assert_eq!(cfg.identity.api_key.as_deref(), Some("anon-public-key"));
            assert_eq!(cfg.identity.timeout, Duration::from_secs(3));
            assert_eq!(cfg.identity.verify_url.host_str(), Some("project.auth.example.test"));
        },
    );
}

#[test]
#[serial_test::serial]
fn test_from_env_requires_verify_url() {
    with_env(&[("BACKEND_PORT", "4000")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    });
}
