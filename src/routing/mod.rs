//! Request matching.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, headers)
//!     → matcher.rs (evaluate stage predicate)
//!     → true: the stage's guard runs; false: the stage is skipped
//! ```
//!
//! # Design Decisions
//! - Matchers are built at startup and immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always gives the same answer

pub mod matcher;

pub use matcher::{Matcher, PathPrefixMatcher};
