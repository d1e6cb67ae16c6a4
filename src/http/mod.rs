//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (request ID, Axum → InboundRequest adapter)
//!     → gateway handler (validation, upstream call)
//!     → response.rs (GatewayResponse → JSON response, CORS headers)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{AxumInbound, MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
