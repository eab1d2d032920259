//! Per-request spans.
//!
//! The HTTP trace layer opens one span per request. The span carries the
//! trace id assigned by the correlator so framework-level logs line up with
//! the signal events of the same request.

use axum::body::Body;
use axum::http::Request;
use ::tracing::Span;

use crate::http::request::RequestContext;

pub fn make_request_span(req: &Request<Body>) -> Span {
    let trace_id = req
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.trace_id.as_str().to_owned())
        .unwrap_or_default();

    ::tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        trace_id = %trace_id,
    )
}
