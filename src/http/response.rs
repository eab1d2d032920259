//! JSON response envelopes.
//!
//! Every JSON body the sandbox writes carries `ok` and `traceId`. Failure
//! bodies share one shape: `{ ok: false, message, traceId }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::request::TraceId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureBody<'a> {
    pub ok: bool,
    pub message: &'a str,
    pub trace_id: &'a TraceId,
}

/// Build a `{ ok: false, message, traceId }` response with `status`.
pub fn failure(status: StatusCode, message: &str, trace_id: &TraceId) -> Response {
    let body = FailureBody {
        ok: false,
        message,
        trace_id,
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_body_shape() {
        let id = TraceId::generate();
        let body = serde_json::to_value(FailureBody {
            ok: false,
            message: "nope",
            trace_id: &id,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "ok": false, "message": "nope", "traceId": id.as_str() })
        );
    }

    #[test]
    fn test_failure_status() {
        let id = TraceId::generate();
        let response = failure(StatusCode::BAD_REQUEST, "bad", &id);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
