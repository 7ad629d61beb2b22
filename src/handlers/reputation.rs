//! Reputation scoring API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{AiInsights, ApiResponse, PaymentRecord, ReputationScore};
use crate::services::ScoringStrategy;
use crate::state::AppState;

/// Body of `POST /api/reputation/scores`
#[derive(Debug, Deserialize, Validate)]
pub struct ScoreRequest {
    pub records: Vec<PaymentRecord>,
    /// Address viewing the dashboard; enables role labels
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub viewer: Option<String>,
    /// Overrides the configured scoring strategy
    #[serde(default)]
    pub strategy: Option<ScoringStrategy>,
}

/// Body of `POST /api/reputation/:address/insights`
#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    pub records: Vec<PaymentRecord>,
    #[serde(default)]
    pub strategy: Option<ScoringStrategy>,
}

/// POST /api/reputation/scores - Score every address in a record set
pub async fn score_addresses(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ApiResponse<Vec<ReputationScore>>>, ApiError> {
    request.validate()?;
    ensure_within_limit(&state, request.records.len())?;

    let strategy = request
        .strategy
        .unwrap_or(state.engine.config().score_strategy);
    let scores = state.engine.score_addresses_with(
        strategy,
        &request.records,
        request.viewer.as_deref(),
    )?;

    Ok(Json(ApiResponse::ok(scores)))
}

/// POST /api/reputation/:address/insights - Insights for one address
pub async fn get_insights(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Json(request): Json<InsightsRequest>,
) -> Result<Json<ApiResponse<AiInsights>>, ApiError> {
    if address.trim().is_empty() {
        return Err(ApiError::BadRequest("address must not be empty".to_string()));
    }
    ensure_within_limit(&state, request.records.len())?;

    let strategy = request
        .strategy
        .unwrap_or(state.engine.config().insight_strategy);
    let insights = state
        .engine
        .insights_at(strategy, &address, &request.records, Utc::now())?;

    Ok(Json(ApiResponse::ok(insights)))
}

pub(crate) fn ensure_within_limit(state: &AppState, count: usize) -> Result<(), ApiError> {
    if count > state.max_records_per_request {
        return Err(ApiError::PayloadTooLarge(format!(
            "{} records exceed the limit of {}",
            count, state.max_records_per_request
        )));
    }
    Ok(())
}
