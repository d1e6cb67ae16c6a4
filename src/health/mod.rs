//! Liveness endpoint.
//!
//! Answers every request with a static message and echoes the method and
//! request target, so a shortcut author can confirm the deployment is
//! reachable before wiring up the AI endpoint.

use axum::http::{Method, Uri};
use axum::Json;
use serde::Serialize;

pub const HEALTH_MESSAGE: &str = "Function is working!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub message: &'static str,
    pub method: String,
    pub path: String,
}

impl HealthReport {
    /// `path` is the request target as received, query string included.
    pub fn echo(method: &Method, uri: &Uri) -> Self {
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        Self {
            message: HEALTH_MESSAGE,
            method: method.to_string(),
            path,
        }
    }
}

pub async fn health_handler(method: Method, uri: Uri) -> Json<HealthReport> {
    tracing::debug!(method = %method, uri = %uri, "Health check");
    Json(HealthReport::echo(&method, &uri))
}
