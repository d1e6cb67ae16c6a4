//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable, read at startup)
//!
//! process environment (per call)
//!     → env.rs (GATEWAY_API_KEY, UPSTREAM_BASE, UPSTREAM_KEY, MODEL)
//!     → GatewaySettings snapshot handed to the handler
//! ```
//!
//! # Design Decisions
//! - Secrets never live in the config file
//! - All file fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{GatewaySettings, SettingsSource, UpstreamConfig};
pub use loader::{load_config, ConfigError};
pub use schema::GatewayConfig;
