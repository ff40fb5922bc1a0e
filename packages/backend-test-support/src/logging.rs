//! One-time tracing initialization for test binaries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install the global test subscriber. Idempotent; safe to call from every
/// test and from `#[ctor]` hooks.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.
/// Output goes through the test writer so cargo/nextest capture it.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
