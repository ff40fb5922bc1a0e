//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: one-time logging
//! initialization, an in-memory log capture for asserting on emitted events,
//! and assertions for the JSON error contract.

pub mod error_body;
pub mod log_capture;
pub mod logging;

pub use error_body::assert_error_body;
pub use log_capture::CapturedLogs;
