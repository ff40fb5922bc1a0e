#![cfg(test)]

//! Test logging for the crate's unit tests.
//!
//! Delegates to the shared initializer so unit and integration tests read
//! the same `TEST_LOG` / `RUST_LOG` variables.

pub fn init() {
    backend_test_support::logging::init();
}
