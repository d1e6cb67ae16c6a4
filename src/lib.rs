//! AI note gateway library.
//!
//! Accepts a short note from a trusted client, forwards it with a
//! mode-specific instruction to an OpenAI-compatible completion service and
//! returns the reply as JSON.

pub mod config;
pub mod gateway;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{GatewayConfig, SettingsSource};
pub use gateway::{Gateway, Mode};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
