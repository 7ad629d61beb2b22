//! Payment reputation engine
//!
//! Entry point tying the pipeline together: validation, aggregation per
//! address, composite scoring, risk classification, next-payment prediction
//! and insight generation. Every call receives its full input and returns an
//! independent result; the engine keeps no state besides its configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidRecordError;
use crate::models::{AiInsights, PaymentData, PaymentRecord, ReputationScore, RiskLevel};
use crate::services::aggregator::{self, AddressMetrics};
use crate::services::insights::generate_insights;
use crate::services::predictor::predict_next_payment;
use crate::services::scoring::{self, ScoringInput, ScoringStrategy, WeightProfile};
use crate::services::validation::{validate_payment_data, validate_records};

/// Strategy and weight selection for an engine instance
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Strategy behind `ReputationScore::composite_score`
    pub score_strategy: ScoringStrategy,
    /// Strategy behind `AiInsights::score`
    pub insight_strategy: ScoringStrategy,
    pub weights: WeightProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score_strategy: ScoringStrategy::Simple,
            insight_strategy: ScoringStrategy::Sequence,
            weights: WeightProfile::default(),
        }
    }
}

/// Stateless reputation scoring engine
#[derive(Debug, Clone, Default)]
pub struct ReputationEngine {
    config: EngineConfig,
}

impl ReputationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reputation of every address appearing in `records`
    pub fn score_addresses(
        &self,
        records: &[PaymentRecord],
        viewer: Option<&str>,
    ) -> Result<Vec<ReputationScore>, InvalidRecordError> {
        self.score_addresses_with(self.config.score_strategy, records, viewer)
    }

    /// Reputation of every address, scored with an explicit strategy.
    ///
    /// Output is ordered by address. When `viewer` is given each score also
    /// carries the address's role relative to it.
    pub fn score_addresses_with(
        &self,
        strategy: ScoringStrategy,
        records: &[PaymentRecord],
        viewer: Option<&str>,
    ) -> Result<Vec<ReputationScore>, InvalidRecordError> {
        validate_records(records).map_err(|e| {
            tracing::warn!(error = %e, "Rejected payment records");
            e
        })?;

        let scores: Vec<ReputationScore> = aggregator::aggregate(records)
            .into_iter()
            .map(|entry| {
                let sequence = entry.ledger.payment_sequence();
                let composite_score = scoring::score(
                    strategy,
                    &self.config.weights,
                    ScoringInput {
                        metrics: &entry.metrics,
                        sequence: &sequence,
                    },
                );

                ReputationScore {
                    address: entry.ledger.address.clone(),
                    total_transactions: entry.metrics.total_transactions,
                    average_payment_time_days: entry.metrics.average_payment_time,
                    success_rate_percent: entry.metrics.success_rate,
                    total_value: entry.metrics.total_value.clone(),
                    composite_score,
                    payment_history: aggregator::payment_history(&entry.ledger),
                    role: viewer.map(|v| entry.ledger.role_for(v)),
                }
            })
            .collect();

        tracing::debug!(
            records = records.len(),
            addresses = scores.len(),
            strategy = strategy.as_str(),
            "Scored addresses"
        );

        Ok(scores)
    }

    /// Insights for `address` as of the current time
    pub fn insights_for(
        &self,
        address: &str,
        records: &[PaymentRecord],
    ) -> Result<AiInsights, InvalidRecordError> {
        self.insights_at(self.config.insight_strategy, address, records, Utc::now())
    }

    /// Insights for `address` computed against a fixed `now`.
    ///
    /// An address absent from `records` gets the empty-history sentinel:
    /// score 0, high risk and a prediction of `now`.
    pub fn insights_at(
        &self,
        strategy: ScoringStrategy,
        address: &str,
        records: &[PaymentRecord],
        now: DateTime<Utc>,
    ) -> Result<AiInsights, InvalidRecordError> {
        validate_records(records).map_err(|e| {
            tracing::warn!(error = %e, address = %address, "Rejected payment records");
            e
        })?;

        let ledger = aggregator::ledger_for(records, address);
        let transactions = ledger.transactions();
        let metrics = AddressMetrics::from_records(&transactions);
        let sequence = ledger.payment_sequence();

        tracing::debug!(
            address = %address,
            transactions = transactions.len(),
            strategy = strategy.as_str(),
            "Generating insights"
        );

        Ok(self.analyze(strategy, &metrics, &sequence, now))
    }

    /// Insights straight from a derived payment series.
    ///
    /// Summary statistics cannot be rebuilt from `PaymentData`, so this path
    /// always uses the sequence-based strategy.
    pub fn insights_for_payments(
        &self,
        payments: &[PaymentData],
        now: DateTime<Utc>,
    ) -> Result<AiInsights, InvalidRecordError> {
        validate_payment_data(payments)?;
        let metrics = AddressMetrics::empty();
        Ok(self.analyze(ScoringStrategy::Sequence, &metrics, payments, now))
    }

    fn analyze(
        &self,
        strategy: ScoringStrategy,
        metrics: &AddressMetrics,
        sequence: &[PaymentData],
        now: DateTime<Utc>,
    ) -> AiInsights {
        let score = scoring::score(
            strategy,
            &self.config.weights,
            ScoringInput { metrics, sequence },
        );

        AiInsights {
            score,
            risk_level: RiskLevel::from_score(score),
            predicted_next_payment: predict_next_payment(sequence, now),
            insights: generate_insights(score, sequence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentState;
    use crate::services::insights::{HIGH_LATE_RATE, LOW_RELIABILITY};
    use bigdecimal::BigDecimal;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()
    }

    fn paid(id: &str, payer: &str, payee: &str, offset_days: i64, days: i64) -> PaymentRecord {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::days(offset_days);
        PaymentRecord {
            request_id: id.to_string(),
            payer: payer.to_string(),
            payee: payee.to_string(),
            amount: BigDecimal::from(10),
            created_at,
            paid_at: Some(created_at + Duration::days(days)),
            state: PaymentState::Paid,
        }
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.score_strategy, ScoringStrategy::Simple);
        assert_eq!(config.insight_strategy, ScoringStrategy::Sequence);
    }

    #[test]
    fn test_single_record_insights() {
        let engine = ReputationEngine::default();
        let records = vec![paid("1", "alice", "bob", 0, 5)];
        let insights = engine
            .insights_at(ScoringStrategy::Sequence, "bob", &records, now())
            .unwrap();

        assert_eq!(insights.score, 77);
        assert_eq!(insights.risk_level, RiskLevel::Medium);
        assert_eq!(insights.predicted_next_payment, now());
    }

    #[test]
    fn test_unknown_address_sentinel() {
        let engine = ReputationEngine::default();
        let records = vec![paid("1", "alice", "bob", 0, 5)];
        let insights = engine
            .insights_at(ScoringStrategy::Sequence, "nobody", &records, now())
            .unwrap();

        assert_eq!(insights.score, 0);
        assert_eq!(insights.risk_level, RiskLevel::High);
        assert_eq!(insights.predicted_next_payment, now());
        assert_eq!(insights.insights, vec![LOW_RELIABILITY.to_string()]);
    }

    #[test]
    fn test_invalid_records_rejected_before_scoring() {
        let engine = ReputationEngine::default();
        let mut bad = paid("1", "alice", "bob", 0, 5);
        bad.amount = BigDecimal::from(-1);

        assert!(matches!(
            engine.score_addresses(&[bad.clone()], None),
            Err(InvalidRecordError::NegativeAmount { index: 0, .. })
        ));
        assert!(engine.insights_for("bob", &[bad]).is_err());
    }

    #[test]
    fn test_score_addresses_with_viewer() {
        let engine = ReputationEngine::default();
        let records = vec![paid("1", "alice", "bob", 0, 5)];
        let scores = engine.score_addresses(&records, Some("alice")).unwrap();

        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].address, "alice");
        assert_eq!(scores[0].role, Some(crate::models::CounterpartyRole::Viewer));
        assert_eq!(
            scores[1].role,
            Some(crate::models::CounterpartyRole::RequestSender)
        );
        assert!(engine
            .score_addresses(&records, None)
            .unwrap()
            .iter()
            .all(|s| s.role.is_none()));
    }

    #[test]
    fn test_insights_for_payments_validates() {
        let engine = ReputationEngine::default();
        let payments = vec![PaymentData {
            amount: BigDecimal::from(1),
            time_to_pay_days: f64::INFINITY,
            is_on_time: true,
            frequency: 1.0,
            success_rate: 1.0,
        }];
        assert!(engine.insights_for_payments(&payments, now()).is_err());
    }

    #[test]
    fn test_all_late_payments() {
        let engine = ReputationEngine::default();
        let payments: Vec<PaymentData> = (0..3)
            .map(|_| PaymentData {
                amount: BigDecimal::from(10),
                time_to_pay_days: 0.0,
                is_on_time: false,
                frequency: 1.0,
                success_rate: 0.0,
            })
            .collect();
        let insights = engine.insights_for_payments(&payments, now()).unwrap();

        assert!(insights.score < 60);
        assert!(insights.insights.contains(&HIGH_LATE_RATE.to_string()));
        assert!(insights.insights.contains(&LOW_RELIABILITY.to_string()));
    }
}
