//! Metric aggregation: groups payment records by counterparty address and
//! computes per-address summary statistics.
//!
//! Ledgers borrow from the caller's record slice and are rebuilt on every
//! call; nothing is cached between invocations.

use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::models::{CounterpartyRole, HistoryPoint, PaymentData, PaymentRecord, PaymentState};

/// Transactions of one address, split by the side it took
#[derive(Debug, Clone)]
pub struct AddressLedger<'a> {
    pub address: String,
    /// Records where the address is the payer
    pub sent: Vec<&'a PaymentRecord>,
    /// Records where the address is the payee
    pub received: Vec<&'a PaymentRecord>,
}

impl<'a> AddressLedger<'a> {
    fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            sent: Vec::new(),
            received: Vec::new(),
        }
    }

    /// Every record the address took part in, each counted once.
    ///
    /// A self-addressed record sits in both `sent` and `received`; it is
    /// only yielded from `sent`.
    pub fn transactions(&self) -> Vec<&'a PaymentRecord> {
        self.sent
            .iter()
            .copied()
            .chain(
                self.received
                    .iter()
                    .copied()
                    .filter(|r| !r.is_self_addressed()),
            )
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty() && self.received.is_empty()
    }

    /// Transactions ordered by creation time
    pub fn chronological(&self) -> Vec<&'a PaymentRecord> {
        let mut txs = self.transactions();
        txs.sort_by_key(|r| r.created_at);
        txs
    }

    /// Per-payment series for the sequence-based scorer
    pub fn payment_sequence(&self) -> Vec<PaymentData> {
        self.chronological()
            .into_iter()
            .map(PaymentData::from)
            .collect()
    }

    /// Relationship of this address to `viewer`
    pub fn role_for(&self, viewer: &str) -> CounterpartyRole {
        if self.address == viewer {
            CounterpartyRole::Viewer
        } else if !self.received.is_empty() {
            CounterpartyRole::RequestSender
        } else {
            CounterpartyRole::RequestReceiver
        }
    }
}

/// Build one ledger per address appearing on either side of any record.
///
/// Keys are ordered by address so repeated calls produce identical output.
pub fn build_ledgers(records: &[PaymentRecord]) -> BTreeMap<String, AddressLedger<'_>> {
    let mut ledgers: BTreeMap<String, AddressLedger<'_>> = BTreeMap::new();

    for record in records {
        ledgers
            .entry(record.payer.clone())
            .or_insert_with(|| AddressLedger::new(&record.payer))
            .sent
            .push(record);
        ledgers
            .entry(record.payee.clone())
            .or_insert_with(|| AddressLedger::new(&record.payee))
            .received
            .push(record);
    }

    ledgers
}

/// Ledger for a single address; empty when the address never appears
pub fn ledger_for<'a>(records: &'a [PaymentRecord], address: &str) -> AddressLedger<'a> {
    let mut ledger = AddressLedger::new(address);
    for record in records {
        if record.payer == address {
            ledger.sent.push(record);
        }
        if record.payee == address {
            ledger.received.push(record);
        }
    }
    ledger
}

/// Summary statistics of one address
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddressMetrics {
    pub total_transactions: u32,
    pub successful_count: u32,
    /// Percentage of settled records (0-100)
    pub success_rate: f64,
    /// Mean days to payment over `Paid` records with a payment time
    pub average_payment_time: f64,
    pub total_value: BigDecimal,
}

impl AddressMetrics {
    /// Metrics of an address with no transactions
    pub fn empty() -> Self {
        Self {
            total_transactions: 0,
            successful_count: 0,
            success_rate: 0.0,
            average_payment_time: 0.0,
            total_value: BigDecimal::zero(),
        }
    }

    pub fn from_records(records: &[&PaymentRecord]) -> Self {
        let total_transactions = records.len() as u32;
        if total_transactions == 0 {
            return Self::empty();
        }

        let successful_count = records.iter().filter(|r| r.state.is_settled()).count() as u32;
        let success_rate = successful_count as f64 / total_transactions as f64 * 100.0;

        let payment_times: Vec<f64> = records
            .iter()
            .filter(|r| r.state == PaymentState::Paid)
            .filter_map(|r| r.days_to_pay())
            .collect();
        let average_payment_time = if payment_times.is_empty() {
            0.0
        } else {
            payment_times.iter().sum::<f64>() / payment_times.len() as f64
        };

        let total_value = records
            .iter()
            .fold(BigDecimal::zero(), |sum, r| sum + &r.amount);

        Self {
            total_transactions,
            successful_count,
            success_rate,
            average_payment_time,
            total_value,
        }
    }
}

/// Aggregated ledger of one address, ready for scoring
#[derive(Debug, Clone)]
pub struct AggregatedAddress<'a> {
    pub ledger: AddressLedger<'a>,
    pub metrics: AddressMetrics,
}

/// Aggregate every address with at least one transaction
pub fn aggregate(records: &[PaymentRecord]) -> Vec<AggregatedAddress<'_>> {
    build_ledgers(records)
        .into_values()
        .filter(|ledger| !ledger.is_empty())
        .map(|ledger| {
            let metrics = AddressMetrics::from_records(&ledger.transactions());
            AggregatedAddress { ledger, metrics }
        })
        .collect()
}

/// Chronological history points of a ledger
pub fn payment_history(ledger: &AddressLedger<'_>) -> Vec<HistoryPoint> {
    ledger
        .chronological()
        .into_iter()
        .map(|r| HistoryPoint {
            date: r.created_at.date_naive(),
            amount: r.amount.clone(),
            payment_time_days: r.days_to_pay().unwrap_or(0.0),
        })
        .collect()
}
