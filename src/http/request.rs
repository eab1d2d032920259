//! Request correlation.
//!
//! # Responsibilities
//! - Assign every inbound request a process-unique trace id
//! - Expose the id to handlers through `RequestContext`
//! - Stamp `x-trace-id` on the response, whatever the handler returned
//!
//! # Design Decisions
//! - Trace id assigned as early as possible, before any other layer
//! - Ids are never taken from the client; an incoming `x-trace-id` is ignored
//! - Format is `{process prefix}:{sequence}` so ids stay unique for the
//!   lifetime of the process without coordination

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{FromRequestParts, MatchedPath},
    http::{request::Parts, HeaderName, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use uuid::Uuid;

use crate::observability::metrics;

/// Response header carrying the trace id.
pub const X_TRACE_ID: HeaderName = HeaderName::from_static("x-trace-id");

static PROCESS_PREFIX: OnceLock<String> = OnceLock::new();
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Opaque per-request correlation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TraceId(String);

impl TraceId {
    /// Allocate the next trace id for this process.
    pub fn generate() -> Self {
        let prefix = PROCESS_PREFIX.get_or_init(|| {
            let mut prefix = Uuid::new_v4().simple().to_string();
            prefix.truncate(12);
            prefix.to_uppercase()
        });
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed) + 1;
        Self(format!("{prefix}:{sequence:08X}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request context shared by every stage of the pipeline.
///
/// Lives in the request extensions from the correlator onwards and is
/// dropped with the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub trace_id: TraceId,
    pub method: Method,
    pub path: String,
}

impl RequestContext {
    pub fn new(trace_id: TraceId, req: &Request<Body>) -> Self {
        Self {
            trace_id,
            method: req.method().clone(),
            path: req.uri().path().to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Access to the correlation context of a request.
pub trait TraceIdExt {
    fn context(&self) -> Option<&RequestContext>;
}

impl<B> TraceIdExt for Request<B> {
    fn context(&self) -> Option<&RequestContext> {
        self.extensions().get::<RequestContext>()
    }
}

/// Outermost middleware: assigns the trace id and stamps the response.
pub async fn correlate(mut req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());

    let ctx = RequestContext::new(TraceId::generate(), &req);
    let trace_id = ctx.trace_id.clone();
    req.extensions_mut().insert(ctx);

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(trace_id.as_str()) {
        response.headers_mut().insert(X_TRACE_ID, value);
    }
    metrics::record_request(&route, response.status().as_u16(), start);

    response
}
