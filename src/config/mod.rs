//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PipelineConfig (validated, immutable)
//!     → ApiService::from_config / ReqwestTransport::from_config / init_logging
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and passed explicitly; request building
//!   never reads process state
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, LoadError};
pub use schema::{LoggingConfig, MonitoringConfig, PipelineConfig, ServiceConfig, TransportConfig};
pub use validation::{validate_config, ValidationError};
