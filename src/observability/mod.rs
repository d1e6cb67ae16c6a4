//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (log aggregation)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a call
//! - Secrets and note text are never logged
//! - Metric recording is a no-op until an exporter is installed

pub mod logging;
pub mod metrics;
