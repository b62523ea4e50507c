//! Liveness reporting.
//!
//! `/health` never fails and never touches the domain telemetry: no domain
//! spans, counters or histograms are emitted for it. The HTTP-level span from
//! `TraceLayer` still wraps it like every other request.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Body of a health response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
