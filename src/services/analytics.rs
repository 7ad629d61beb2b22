//! Activity analytics over a record set

use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};

use crate::models::{ActivitySummary, MonthlyActivity, PaymentRecord};

pub struct AnalyticsService;

impl AnalyticsService {
    /// Request count, exact total value and per-month totals.
    ///
    /// Months are keyed by the record's creation date (UTC) and returned in
    /// chronological order.
    pub fn activity_summary(records: &[PaymentRecord]) -> ActivitySummary {
        let mut months: BTreeMap<String, (u32, BigDecimal)> = BTreeMap::new();
        let mut total_value = BigDecimal::zero();

        for record in records {
            total_value += &record.amount;
            let entry = months
                .entry(record.created_at.format("%Y-%m").to_string())
                .or_insert_with(|| (0, BigDecimal::zero()));
            entry.0 += 1;
            entry.1 += &record.amount;
        }

        ActivitySummary {
            total_requests: records.len() as u32,
            total_value,
            monthly: months
                .into_iter()
                .map(|(month, (request_count, value))| MonthlyActivity {
                    month,
                    request_count,
                    value,
                })
                .collect(),
        }
    }
}
