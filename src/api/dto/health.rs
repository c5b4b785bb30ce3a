//! DTOs for health check endpoint.

use serde::Serialize;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of configured listing targets.
    pub targets: usize,
    /// Active notification back end.
    pub notifier: String,
}
