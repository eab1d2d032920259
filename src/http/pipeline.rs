//! Ordered request stages.
//!
//! A `Pipeline` is a fixed list of `(matcher, guard)` pairs evaluated in
//! insertion order. A stage whose matcher rejects the request is skipped; the
//! first guard that fails short-circuits the request and its error becomes
//! the response. The list is built once at startup and never mutated.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::SandboxConfig;
use crate::error::SandboxError;
use crate::http::middleware::access_gate;
use crate::http::request::{RequestContext, TraceIdExt};
use crate::routing::Matcher;

/// Admission check applied to requests selected by a stage's matcher.
pub trait Guard: Send + Sync + std::fmt::Debug {
    fn check(&self, req: &Request<Body>, ctx: &RequestContext) -> Result<(), SandboxError>;
}

/// One predicate + handler pair.
#[derive(Debug)]
pub struct Stage {
    name: &'static str,
    matcher: Box<dyn Matcher>,
    guard: Box<dyn Guard>,
}

impl Stage {
    pub fn new(name: &'static str, matcher: Box<dyn Matcher>, guard: Box<dyn Guard>) -> Self {
        Self {
            name,
            matcher,
            guard,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[derive(Debug, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the stage list for this process. A disabled gate adds nothing.
    pub fn from_config(config: &SandboxConfig) -> Self {
        let mut pipeline = Self::new();
        if let Some(stage) = access_gate::stage(&config.access_gate) {
            pipeline = pipeline.with_stage(stage);
        }
        pipeline
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn evaluate(&self, req: &Request<Body>, ctx: &RequestContext) -> Result<(), SandboxError> {
        for stage in &self.stages {
            if !stage.matcher.matches(req) {
                continue;
            }
            if let Err(err) = stage.guard.check(req, ctx) {
                tracing::debug!(
                    trace_id = %ctx.trace_id,
                    stage = stage.name,
                    path = %ctx.path,
                    status = %err.status(),
                    "Request rejected by pipeline stage"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Middleware running the pipeline ahead of the signal handlers.
pub async fn run_pipeline(
    State(pipeline): State<Arc<Pipeline>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if pipeline.is_empty() {
        return next.run(req).await;
    }

    // Rejections must echo the id the correlator stamps on the response.
    let Some(ctx) = req.context().cloned() else {
        tracing::error!(path = %req.uri().path(), "Request reached pipeline without a trace id");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    match pipeline.evaluate(&req, &ctx) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}
