//! Route matching logic.
//!
//! # Responsibilities
//! - Decide whether a pipeline stage applies to a request
//! - Match path prefixes on segment boundaries
//!
//! # Design Decisions
//! - Path prefix matching is case-insensitive
//! - `/api` matches `/api` and `/api/...` but not `/apix`

use axum::body::Body;
use axum::http::Request;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher. A trailing slash is ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.len() > 1 && prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix }
    }

    /// Segment-aware, case-insensitive prefix test on a raw path.
    pub fn matches_path(&self, path: &str) -> bool {
        let len = self.prefix.len();
        if path.len() < len || !path.is_char_boundary(len) {
            return false;
        }
        let (head, rest) = path.split_at(len);
        head.eq_ignore_ascii_case(&self.prefix) && (rest.is_empty() || rest.starts_with('/'))
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matches_path(req.uri().path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api");

        let req1 = Request::builder()
            .uri("http://example.com/api/log/info")
            .body(Body::default())
            .unwrap();
        assert!(matcher.matches(&req1));

        let req2 = Request::builder()
            .uri("http://example.com/images")
            .body(Body::default())
            .unwrap();
        assert!(!matcher.matches(&req2));
    }

    #[test]
    fn test_path_matcher_case_insensitive() {
        let matcher = PathPrefixMatcher::new("/api");
        assert!(matcher.matches_path("/API/health"));
        assert!(matcher.matches_path("/Api"));
    }

    #[test]
    fn test_path_matcher_segment_boundary() {
        let matcher = PathPrefixMatcher::new("/api/");
        assert!(matcher.matches_path("/api"));
        assert!(matcher.matches_path("/api/"));
        assert!(!matcher.matches_path("/apix/health"));
        assert!(!matcher.matches_path("/ap"));
        assert!(!matcher.matches_path("/"));
    }
}
