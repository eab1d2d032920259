//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (DEMO_API_KEY, SANDBOX_*)
//!     → validation.rs (semantic checks)
//!     → SandboxConfig (validated, immutable)
//!     → shared with the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload path
//! - All fields have defaults so the service runs with no config file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AccessGateConfig;
pub use schema::DependencyConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::SandboxConfig;
