//! Dependency probing subsystem.
//!
//! # Data Flow
//! ```text
//! /api/dependency
//!     → prober.rs (one GET, hard timeout, elapsed always measured)
//!     → ProbeOutcome (status code or classified failure)
//!     → endpoint answers 200 either way
//! ```
//!
//! # Design Decisions
//! - Every outbound call has a deadline independent of the request timeout
//! - Failures become values at this boundary; nothing propagates
//! - No retries: one probe, one result

pub mod prober;

pub use prober::{DependencyProber, ProbeFailure, ProbeOutcome};
