//! Reputation scoring route definitions

use axum::{routing::post, Router};

use crate::handlers::reputation::{get_insights, score_addresses};
use crate::state::AppState;

pub fn reputation_routes() -> Router<AppState> {
    Router::new()
        .route("/api/reputation/scores", post(score_addresses))
        .route("/api/reputation/:address/insights", post(get_insights))
}
