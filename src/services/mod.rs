//! Business logic services for payment reputation scoring

pub mod aggregator;
mod analytics;
pub mod insights;
pub mod predictor;
pub mod reputation_engine;
pub mod risk;
pub mod scoring;
pub mod validation;

pub use analytics::AnalyticsService;
pub use reputation_engine::{EngineConfig, ReputationEngine};
pub use scoring::{ScoringStrategy, WeightProfile};
