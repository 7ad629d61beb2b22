//! Analytics API handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::reputation::ensure_within_limit;
use crate::models::{ActivitySummary, ApiResponse, PaymentRecord};
use crate::services::AnalyticsService;
use crate::state::AppState;

/// Body of `POST /api/analytics/summary`
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub records: Vec<PaymentRecord>,
}

/// POST /api/analytics/summary - Totals and monthly activity
pub async fn get_activity_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<ApiResponse<ActivitySummary>>, ApiError> {
    ensure_within_limit(&state, request.records.len())?;
    crate::services::validation::validate_records(&request.records)?;

    Ok(Json(ApiResponse::ok(AnalyticsService::activity_summary(
        &request.records,
    ))))
}
