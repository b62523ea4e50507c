//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (ServiceConfig::default)
//!     → loader.rs (optional TOML file, parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PORT environment override
//!     → --port flag (main.rs)
//!     → ServiceConfig (validated, immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - Every section has defaults so the services start with no file at all
//! - Validation separates syntactic (serde) from semantic checks
//! - Listen port defaults depend on which service is being started

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_port_override, load_config, resolve_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, SecurityConfig, ServiceConfig, TimeoutConfig,
};
pub use validation::ValidationError;
