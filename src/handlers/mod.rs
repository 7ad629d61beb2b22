//! API handlers for the reputation service

pub mod analytics;
pub mod reputation;

pub use analytics::get_activity_summary;
pub use reputation::{get_insights, score_addresses};

use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
