//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ZenConfig (validated, immutable)
//!     → ContextConfig handed to every request as an extension
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ContextConfig, FormConfig, ListenerConfig, ObservabilityConfig, RenderConfig, ZenConfig,
};
pub use validation::{validate_config, ValidationError};
