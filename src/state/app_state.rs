//! Application state shared across handlers

use std::sync::Arc;

use crate::config::Config;
use crate::services::ReputationEngine;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ReputationEngine>,
    /// Upper bound on records accepted in one request
    pub max_records_per_request: usize,
}

impl AppState {
    pub fn new(engine: Arc<ReputationEngine>, max_records_per_request: usize) -> Self {
        Self {
            engine,
            max_records_per_request,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(ReputationEngine::new(config.engine_config())),
            config.max_records_per_request,
        )
    }
}
