//! Task-local trace context for web requests.
//!
//! `RequestTrace` scopes the request's trace id here so code that has no
//! access to the `HttpRequest` (error rendering, security logging) can still
//! report it.

use std::future::Future;

use tokio::task_local;

pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the request being served on this task, or "unknown"
/// outside of a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| UNKNOWN_TRACE_ID.to_string())
}

/// Run `future` with `trace_id` as the task-local trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_outside_scope() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn scoped_id_is_visible_then_cleared() {
        let seen = with_trace_id("trace-abc".to_string(), async { trace_id() }).await;

        assert_eq!(seen, "trace-abc");
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn inner_scope_shadows_outer() {
        let (inner, outer_after) = with_trace_id("outer".to_string(), async {
            let inner = with_trace_id("inner".to_string(), async { trace_id() }).await;
            (inner, trace_id())
        })
        .await;

        assert_eq!(inner, "inner");
        assert_eq!(outer_after, "outer");
    }
}
