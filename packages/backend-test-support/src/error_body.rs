//! Assertions for the backend's JSON error contract.
//!
//! Deliberately independent of backend types: the contract is the wire
//! format, so it is checked as raw JSON.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{CONTENT_TYPE, WWW_AUTHENTICATE};
use serde_json::{json, Value};

/// Assert that `resp` is an error response with exactly
/// `{ "error": expected_error, "message": expected_message }` as its body.
///
/// Also checks:
/// - JSON content type
/// - `x-trace-id` header is present and non-empty
/// - 401 responses carry `WWW-Authenticate: Bearer`
///
/// Returns the trace id so callers can compare it with other headers.
pub async fn assert_error_body<B>(
    resp: ServiceResponse<B>,
    expected_status: u16,
    expected_error: &str,
    expected_message: &str,
) -> String
where
    B: MessageBody,
{
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Content-Type must be application/json (got {content_type})"
    );

    let trace_id = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present and valid UTF-8")
        .to_string();
    assert!(!trace_id.is_empty(), "x-trace-id header should not be empty");

    if expected_status == 401 {
        assert_eq!(
            headers
                .get(WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer"),
            "401 responses must carry WWW-Authenticate: Bearer"
        );
    }

    let body = actix_web::test::read_body(resp).await;
    let json: Value =
        serde_json::from_slice(&body).expect("error body should be valid JSON");
    assert_eq!(
        json,
        json!({ "error": expected_error, "message": expected_message }),
        "error body must contain exactly the contract fields"
    );

    trace_id
}
