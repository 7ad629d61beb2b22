//! Output models produced by the reputation engine

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Aggregated reputation of a single counterparty address
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReputationScore {
    pub address: String,
    pub total_transactions: u32,
    /// Mean days from creation to payment over paid requests
    pub average_payment_time_days: f64,
    /// Share of settled requests (0-100)
    pub success_rate_percent: f64,
    pub total_value: BigDecimal,
    /// Trust score (0-100, higher is better)
    pub composite_score: u8,
    pub payment_history: Vec<HistoryPoint>,
    /// Relationship to the viewing address, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CounterpartyRole>,
}

/// One entry of an address's payment history
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub amount: BigDecimal,
    pub payment_time_days: f64,
}

/// How an address relates to the address viewing the dashboard
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyRole {
    /// The viewing address itself
    Viewer,
    /// Issued at least one request (appears as payee)
    RequestSender,
    /// Only ever asked to pay
    RequestReceiver,
}

/// Risk category derived from a trust score
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Bundled score, risk, prediction and observations for one address
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiInsights {
    pub score: u8,
    pub risk_level: RiskLevel,
    pub predicted_next_payment: DateTime<Utc>,
    pub insights: Vec<String>,
}

/// Dashboard-level totals over a record set
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub total_requests: u32,
    pub total_value: BigDecimal,
    pub monthly: Vec<MonthlyActivity>,
}

/// Value requested within one calendar month
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    /// Month in `YYYY-MM` form
    pub month: String,
    pub request_count: u32,
    pub value: BigDecimal,
}
