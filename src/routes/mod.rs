//! Route definitions for the reputation API

mod analytics;
mod reputation;

pub use analytics::analytics_routes;
pub use reputation::reputation_routes;

use axum::{routing::get, Router};

use crate::handlers::health_check;
use crate::middleware;
use crate::state::AppState;

/// Full application router with request tracing applied
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(reputation_routes())
        .merge(analytics_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}

async fn root() -> &'static str {
    "Payment Reputation API"
}
