//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: UPSTREAM_*, APIM_*, FUNCTIONS_CUSTOMHANDLER_PORT)
//!     → validation.rs (semantic checks)
//!     → FunctionAppConfig (validated, immutable)
//!     → shared via Arc to the functions
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the process never reloads it
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::FunctionAppConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RoutesConfig;
pub use schema::UpstreamConfig;
