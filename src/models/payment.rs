//! Payment record models consumed by the reputation engine

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Lifecycle state of an invoice/payment request
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Created,
    Pending,
    Paid,
    Complete,
    Canceled,
}

impl PaymentState {
    /// Whether the request reached a settled state
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentState::Paid | PaymentState::Complete)
    }
}

/// A normalized invoice/payment entry between two addresses.
///
/// Address resolution and currency decoding happen upstream; amounts arrive
/// already expressed in the base monetary unit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub request_id: String,
    /// Address expected to pay the request
    pub payer: String,
    /// Address that issued the request and receives the funds
    pub payee: String,
    pub amount: BigDecimal,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    pub state: PaymentState,
}

impl PaymentRecord {
    /// Elapsed days between creation and payment, if a payment was recorded
    pub fn days_to_pay(&self) -> Option<f64> {
        self.paid_at
            .map(|paid| (paid - self.created_at).num_milliseconds() as f64 / MILLIS_PER_DAY)
    }

    pub fn is_self_addressed(&self) -> bool {
        self.payer == self.payee
    }
}

/// Per-payment metrics used by the sequence-based scorer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub amount: BigDecimal,
    pub time_to_pay_days: f64,
    pub is_on_time: bool,
    pub frequency: f64,
    pub success_rate: f64,
}

impl PaymentData {
    pub fn amount_f64(&self) -> f64 {
        self.amount.to_f64().unwrap_or(0.0)
    }
}

impl From<&PaymentRecord> for PaymentData {
    fn from(record: &PaymentRecord) -> Self {
        let is_on_time = record.state.is_settled();
        // Unsettled records carry no payment time even if `paid_at` is set
        let time_to_pay_days = if is_on_time {
            record.days_to_pay().unwrap_or(0.0)
        } else {
            0.0
        };
        Self {
            amount: record.amount.clone(),
            time_to_pay_days,
            is_on_time,
            // Each record counts as one payment event
            frequency: 1.0,
            success_rate: if is_on_time { 1.0 } else { 0.0 },
        }
    }
}
