//! Composite trust scoring for payment counterparties
//!
//! Two scoring strategies are kept side by side:
//!
//! * **Simple weighted**: scores the per-address summary statistics
//!   produced by the aggregator.
//! * **Sequence-based**: scores the chronologically ordered per-payment
//!   series.
//!
//! The strategies weigh different factors and can disagree on the same
//! history. Both are reachable through [`score`] and selected with
//! [`ScoringStrategy`]; weight tables are plain values passed in by the
//! caller.

use bigdecimal::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::PaymentData;
use crate::services::aggregator::AddressMetrics;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Upper bound of every composite score
pub const MAX_SCORE: u8 = 100;

/// Days after which the simple strategy's payment-time factor reaches zero
const PAYMENT_TIME_HORIZON_DAYS: f64 = 30.0;

/// Count/value at which the logarithmic factors saturate
const LOG_SATURATION_BASE: f64 = 100.0;

/// Grace period before a payment counts as late in the timeliness factor
const TIMELINESS_GRACE_DAYS: f64 = 30.0;

/// Exponential decay rate per late day
const TIMELINESS_DECAY: f64 = 0.1;

/// Multiplier turning mean payment frequency into a 0-100 factor
const FREQUENCY_SCALE: f64 = 10.0;

// ============================================================================
// Weight Profiles
// ============================================================================

/// Which scoring strategy to apply
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Weighted summary statistics
    #[default]
    Simple,
    /// Weighted per-payment series
    Sequence,
}

impl ScoringStrategy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "weighted" => Some(ScoringStrategy::Simple),
            "sequence" | "sequential" => Some(ScoringStrategy::Sequence),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringStrategy::Simple => "simple",
            ScoringStrategy::Sequence => "sequence",
        }
    }
}

/// Weights of the simple weighted strategy
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SimpleWeights {
    pub success_rate: f64,
    pub payment_time: f64,
    pub transaction_count: f64,
    pub value: f64,
}

impl Default for SimpleWeights {
    fn default() -> Self {
        Self {
            success_rate: 0.4,
            payment_time: 0.3,
            transaction_count: 0.2,
            value: 0.1,
        }
    }
}

impl SimpleWeights {
    pub fn total(&self) -> f64 {
        self.success_rate + self.payment_time + self.transaction_count + self.value
    }
}

/// Weights of the sequence-based strategy
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SequenceWeights {
    pub history: f64,
    pub timeliness: f64,
    pub amount_reliability: f64,
    pub frequency: f64,
    pub volatility: f64,
}

impl Default for SequenceWeights {
    fn default() -> Self {
        Self {
            history: 0.3,
            timeliness: 0.25,
            amount_reliability: 0.2,
            frequency: 0.15,
            volatility: 0.1,
        }
    }
}

impl SequenceWeights {
    pub fn total(&self) -> f64 {
        self.history + self.timeliness + self.amount_reliability + self.frequency + self.volatility
    }
}

/// Both weight tables; a strategy picks the one it needs
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct WeightProfile {
    pub simple: SimpleWeights,
    pub sequence: SequenceWeights,
}

impl WeightProfile {
    /// Weights of each table are non-negative, finite and sum to 1.0
    pub fn is_normalized(&self) -> bool {
        let simple = [
            self.simple.success_rate,
            self.simple.payment_time,
            self.simple.transaction_count,
            self.simple.value,
        ];
        let sequence = [
            self.sequence.history,
            self.sequence.timeliness,
            self.sequence.amount_reliability,
            self.sequence.frequency,
            self.sequence.volatility,
        ];
        simple
            .iter()
            .chain(sequence.iter())
            .all(|w| w.is_finite() && *w >= 0.0)
            && (self.simple.total() - 1.0).abs() < 1e-9
            && (self.sequence.total() - 1.0).abs() < 1e-9
    }
}

// ============================================================================
// Unified Interface
// ============================================================================

/// Everything either strategy may read for one address
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub metrics: &'a AddressMetrics,
    /// Chronologically ordered payment series
    pub sequence: &'a [PaymentData],
}

/// Score one address with the chosen strategy (0-100, higher is better)
pub fn score(strategy: ScoringStrategy, weights: &WeightProfile, input: ScoringInput<'_>) -> u8 {
    match strategy {
        ScoringStrategy::Simple => simple_score(&weights.simple, input.metrics),
        ScoringStrategy::Sequence => sequence_score(&weights.sequence, input.sequence),
    }
}

/// Round half away from zero and clamp into `[0, 100]`
pub fn clamp_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, MAX_SCORE as f64) as u8
}

// ============================================================================
// Simple Weighted Strategy
// ============================================================================

/// Factor scores of the simple strategy, each in `[0, 100]`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SimpleBreakdown {
    pub success_rate: f64,
    pub payment_time_score: f64,
    pub transaction_score: f64,
    pub value_score: f64,
}

impl SimpleBreakdown {
    pub fn weighted_sum(&self, weights: &SimpleWeights) -> f64 {
        self.success_rate * weights.success_rate
            + self.payment_time_score * weights.payment_time
            + self.transaction_score * weights.transaction_count
            + self.value_score * weights.value
    }
}

pub fn simple_breakdown(metrics: &AddressMetrics) -> SimpleBreakdown {
    // Linear decay: same-day payment = 100, 30+ days = 0
    let payment_time_score =
        (100.0 - (metrics.average_payment_time / PAYMENT_TIME_HORIZON_DAYS) * 100.0).max(0.0);

    let transaction_score = log_saturating(metrics.total_transactions as f64);
    let value_score = log_saturating(metrics.total_value.to_f64().unwrap_or(0.0));

    SimpleBreakdown {
        success_rate: metrics.success_rate.clamp(0.0, 100.0),
        payment_time_score,
        transaction_score,
        value_score,
    }
}

pub fn simple_score(weights: &SimpleWeights, metrics: &AddressMetrics) -> u8 {
    if metrics.total_transactions == 0 {
        return 0;
    }
    clamp_score(simple_breakdown(metrics).weighted_sum(weights))
}

/// `ln(x + 1) / ln(100) * 100`, capped at 100
fn log_saturating(x: f64) -> f64 {
    ((x.max(0.0) + 1.0).ln() / LOG_SATURATION_BASE.ln() * 100.0).min(100.0)
}

// ============================================================================
// Sequence-Based Strategy
// ============================================================================

/// Factor scores of the sequence strategy
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SequenceBreakdown {
    /// Percentage of on-time payments
    pub success_rate: f64,
    pub timeliness: f64,
    pub amount_reliability: f64,
    pub frequency: f64,
    /// `None` when the series has fewer than two payments
    pub volatility: Option<f64>,
}

impl SequenceBreakdown {
    pub fn weighted_sum(&self, weights: &SequenceWeights) -> f64 {
        self.success_rate * weights.history
            + self.timeliness * weights.timeliness
            + self.amount_reliability * weights.amount_reliability
            + self.frequency * weights.frequency
            + self.volatility.unwrap_or(0.0) * weights.volatility
    }
}

/// Factor scores of a non-empty series; `None` for an empty one
pub fn sequence_breakdown(payments: &[PaymentData]) -> Option<SequenceBreakdown> {
    if payments.is_empty() {
        return None;
    }

    Some(SequenceBreakdown {
        success_rate: success_rate(payments),
        timeliness: timeliness_score(payments),
        amount_reliability: amount_reliability(payments),
        frequency: frequency_score(payments),
        volatility: volatility_score(payments),
    })
}

pub fn sequence_score(weights: &SequenceWeights, payments: &[PaymentData]) -> u8 {
    match sequence_breakdown(payments) {
        Some(breakdown) => clamp_score(breakdown.weighted_sum(weights)),
        None => 0,
    }
}

fn success_rate(payments: &[PaymentData]) -> f64 {
    let on_time = payments.iter().filter(|p| p.is_on_time).count();
    on_time as f64 / payments.len() as f64 * 100.0
}

fn timeliness_score(payments: &[PaymentData]) -> f64 {
    let total: f64 = payments
        .iter()
        .map(|p| {
            let days_late = (p.time_to_pay_days - TIMELINESS_GRACE_DAYS).max(0.0);
            100.0 * (-TIMELINESS_DECAY * days_late).exp()
        })
        .sum();
    total / payments.len() as f64
}

/// Coefficient-of-variation penalty over payment amounts
fn amount_reliability(payments: &[PaymentData]) -> f64 {
    let amounts: Vec<f64> = payments.iter().map(PaymentData::amount_f64).collect();
    let n = amounts.len() as f64;
    let mean = amounts.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        // All-zero amounts carry no variation
        return 100.0;
    }

    let variance = amounts
        .iter()
        .map(|a| {
            let diff = a - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    (100.0 - (std_dev / mean) * 100.0).max(0.0)
}

fn frequency_score(payments: &[PaymentData]) -> f64 {
    let mean = payments.iter().map(|p| p.frequency).sum::<f64>() / payments.len() as f64;
    (mean * FREQUENCY_SCALE).min(100.0)
}

/// `100 - mean |Δ time_to_pay|` between consecutive payments
pub fn volatility_score(payments: &[PaymentData]) -> Option<f64> {
    if payments.len() < 2 {
        return None;
    }
    let deltas: Vec<f64> = payments
        .windows(2)
        .map(|w| (w[1].time_to_pay_days - w[0].time_to_pay_days).abs())
        .collect();
    let mean_delta = deltas.iter().sum::<f64>() / deltas.len() as f64;
    Some((100.0 - mean_delta).max(0.0))
}
