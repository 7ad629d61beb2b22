//! Natural-language observations about a payment history.
//!
//! Rules are evaluated in a fixed order and fire independently; the two
//! all-clear observations are emitted only when no warning fired.

use crate::models::PaymentData;
use crate::services::risk::MEDIUM_RISK_THRESHOLD;
use crate::services::scoring::volatility_score;

pub const LOW_RELIABILITY: &str = "Payment reliability needs improvement";
pub const HIGH_LATE_RATE: &str = "High rate of late payments detected";
pub const IRREGULAR_PATTERN: &str = "Payment patterns are irregular";
pub const HEALTHY_HISTORY: &str = "Payment history looks healthy";
pub const CONSISTENT_PATTERN: &str = "Consistent payment patterns detected";

/// Share of late payments above which the late-payment warning fires
const LATE_RATIO_THRESHOLD: f64 = 0.3;

/// Volatility score below which payment timing counts as irregular
const IRREGULAR_VOLATILITY_THRESHOLD: f64 = 50.0;

/// Fraction of payments not made on time; `0` for an empty series
pub fn late_ratio(payments: &[PaymentData]) -> f64 {
    if payments.is_empty() {
        return 0.0;
    }
    let late = payments.iter().filter(|p| !p.is_on_time).count();
    late as f64 / payments.len() as f64
}

pub fn generate_insights(score: u8, payments: &[PaymentData]) -> Vec<String> {
    let mut insights = Vec::new();

    if score < MEDIUM_RISK_THRESHOLD {
        insights.push(LOW_RELIABILITY.to_string());
    }

    if late_ratio(payments) > LATE_RATIO_THRESHOLD {
        insights.push(HIGH_LATE_RATE.to_string());
    }

    // Fewer than two payments have no timing pattern to judge
    if let Some(volatility) = volatility_score(payments) {
        if volatility < IRREGULAR_VOLATILITY_THRESHOLD {
            insights.push(IRREGULAR_PATTERN.to_string());
        }
    }

    if insights.is_empty() {
        insights.push(HEALTHY_HISTORY.to_string());
        insights.push(CONSISTENT_PATTERN.to_string());
    }

    insights
}
