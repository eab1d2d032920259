//! Access gate.
//!
//! Requires `x-demo-key` to equal the configured secret for every request
//! under `/api`. Exists only when a secret is configured; otherwise no stage
//! is built and requests pass untouched.

use axum::{body::Body, http::Request};

use crate::config::AccessGateConfig;
use crate::error::SandboxError;
use crate::http::pipeline::{Guard, Stage};
use crate::http::request::RequestContext;
use crate::routing::PathPrefixMatcher;

/// Exact-match shared secret check.
#[derive(Clone)]
pub struct ApiKeyGuard {
    secret: String,
}

impl ApiKeyGuard {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for ApiKeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGuard").finish_non_exhaustive()
    }
}

impl Guard for ApiKeyGuard {
    fn check(&self, req: &Request<Body>, ctx: &RequestContext) -> Result<(), SandboxError> {
        let provided = req
            .headers()
            .get(AccessGateConfig::KEY_HEADER)
            .map(|value| value.as_bytes());

        match provided {
            Some(value) if value == self.secret.as_bytes() => Ok(()),
            _ => Err(SandboxError::AuthRejected {
                trace_id: ctx.trace_id.clone(),
            }),
        }
    }
}

/// The gate stage, or `None` when no secret is configured.
pub fn stage(config: &AccessGateConfig) -> Option<Stage> {
    let secret = config.secret()?;
    tracing::info!(
        prefix = AccessGateConfig::PROTECTED_PREFIX,
        header = AccessGateConfig::KEY_HEADER,
        "Access gate enabled"
    );
    Some(Stage::new(
        "access_gate",
        Box::new(PathPrefixMatcher::new(AccessGateConfig::PROTECTED_PREFIX)),
        Box::new(ApiKeyGuard::new(secret)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::TraceId;

    fn check(guard: &ApiKeyGuard, key: Option<&str>) -> Result<(), SandboxError> {
        let mut builder = Request::builder().uri("/api/health");
        if let Some(key) = key {
            builder = builder.header("x-demo-key", key);
        }
        let req = builder.body(Body::empty()).unwrap();
        let ctx = RequestContext::new(TraceId::generate(), &req);
        guard.check(&req, &ctx)
    }

    #[test]
    fn test_exact_match_required() {
        let guard = ApiKeyGuard::new("s3cret");
        assert!(check(&guard, Some("s3cret")).is_ok());
        assert!(check(&guard, Some("S3CRET")).is_err());
        assert!(check(&guard, Some("s3cret ")).is_err());
        assert!(check(&guard, Some("")).is_err());
        assert!(matches!(
            check(&guard, None),
            Err(SandboxError::AuthRejected { .. })
        ));
    }

    #[test]
    fn test_no_stage_without_secret() {
        assert!(stage(&AccessGateConfig::default()).is_none());
        let config = AccessGateConfig {
            api_key: Some("k".into()),
        };
        assert_eq!(stage(&config).map(|s| s.name()), Some("access_gate"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", ApiKeyGuard::new("hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
