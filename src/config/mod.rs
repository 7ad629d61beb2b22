//! Configuration management for the reputation service
//!
//! This module handles loading and validating configuration from environment
//! variables, with support for different environments (development, staging,
//! production).

use std::env;
use thiserror::Error;

use crate::services::{EngineConfig, ScoringStrategy, WeightProfile};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    #[error("Unknown scoring strategy: {0}")]
    InvalidStrategy(String),

    #[error("Invalid record limit: {0}")]
    InvalidRecordLimit(String),
}

/// Application environment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Current environment
    pub environment: Environment,

    /// Server port
    pub port: u16,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// CORS allowed origins, comma separated
    pub cors_allowed_origins: Option<String>,

    /// Upper bound on records accepted in one request
    pub max_records_per_request: usize,

    /// Strategy used for per-address reputation scores
    pub score_strategy: ScoringStrategy,

    /// Strategy used for insight scores
    pub insight_strategy: ScoringStrategy,
}

impl Default for Config {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            environment: Environment::Development,
            port: 3002,
            log_level: "info".to_string(),
            cors_allowed_origins: None,
            max_records_per_request: 10_000,
            score_strategy: engine.score_strategy,
            insight_strategy: engine.insight_strategy,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| defaults.port.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS").ok();

        let max_records_per_request = match env::var("MAX_RECORDS_PER_REQUEST") {
            Ok(value) => parse_record_limit(&value)?,
            Err(_) => defaults.max_records_per_request,
        };

        let score_strategy = strategy_from_env("SCORING_STRATEGY", defaults.score_strategy)?;
        let insight_strategy = strategy_from_env("INSIGHT_STRATEGY", defaults.insight_strategy)?;

        Ok(Config {
            environment,
            port,
            log_level,
            cors_allowed_origins,
            max_records_per_request,
            score_strategy,
            insight_strategy,
        })
    }

    /// Engine settings derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            score_strategy: self.score_strategy,
            insight_strategy: self.insight_strategy,
            weights: WeightProfile::default(),
        }
    }
}

fn strategy_from_env(var: &str, default: ScoringStrategy) -> Result<ScoringStrategy, ConfigError> {
    match env::var(var) {
        Ok(value) => parse_strategy(&value),
        Err(_) => Ok(default),
    }
}

fn parse_strategy(value: &str) -> Result<ScoringStrategy, ConfigError> {
    ScoringStrategy::parse(value).ok_or_else(|| ConfigError::InvalidStrategy(value.to_string()))
}

/// Positive record count accepted per request
fn parse_record_limit(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ConfigError::InvalidRecordLimit(format!(
            "MAX_RECORDS_PER_REQUEST must be a positive integer (got {:?})",
            value
        ))),
    }
}
