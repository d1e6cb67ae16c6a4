//! Note gateway core.
//!
//! # Data Flow
//! ```text
//! InboundRequest (any transport)
//!     → handler.rs (method check, orchestration)
//!     → validate.rs (shared secret, body decoding)
//!     → upstream.rs (chat completion with the mode's prompt from prompts.rs)
//!     → GatewayResponse { status, envelope } (error.rs)
//! ```
//!
//! Nothing here knows about Axum routing; adapters live in `crate::http`.

pub mod error;
pub mod handler;
pub mod inbound;
pub mod prompts;
pub mod upstream;
pub mod validate;

pub use error::{Envelope, GatewayError, GatewayResponse, UpstreamError};
pub use handler::Gateway;
pub use inbound::{BufferedRequest, InboundRequest};
pub use prompts::{Mode, PromptTable, UnknownMode};
pub use upstream::{CompletionClient, UpstreamClient};
pub use validate::{NoteRequest, API_KEY_HEADER};
