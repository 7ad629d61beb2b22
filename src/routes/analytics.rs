//! Analytics route definitions

use axum::{routing::post, Router};

use crate::handlers::analytics::get_activity_summary;
use crate::state::AppState;

pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/api/analytics/summary", post(get_activity_summary))
}
