//! Input checks run before any aggregation or scoring.
//!
//! Logarithmic and ratio-based formulas silently produce garbage when fed
//! negative or non-finite values, so such input is rejected up front.

use bigdecimal::{BigDecimal, Zero};

use crate::error::InvalidRecordError;
use crate::models::{PaymentData, PaymentRecord};

/// Reject records that cannot be scored. Stops at the first offending record.
pub fn validate_records(records: &[PaymentRecord]) -> Result<(), InvalidRecordError> {
    for (index, record) in records.iter().enumerate() {
        if record.payer.trim().is_empty() {
            return Err(InvalidRecordError::MissingAddress {
                index,
                field: "payer",
            });
        }
        if record.payee.trim().is_empty() {
            return Err(InvalidRecordError::MissingAddress {
                index,
                field: "payee",
            });
        }
        check_amount(index, &record.amount)?;
        if let Some(paid_at) = record.paid_at {
            if paid_at < record.created_at {
                return Err(InvalidRecordError::PaidBeforeCreated { index });
            }
        }
    }
    Ok(())
}

/// Reject derived payment metrics that would corrupt the sequence scorer
pub fn validate_payment_data(payments: &[PaymentData]) -> Result<(), InvalidRecordError> {
    for (index, payment) in payments.iter().enumerate() {
        check_amount(index, &payment.amount)?;
        check_metric(index, "time_to_pay_days", payment.time_to_pay_days)?;
        check_metric(index, "frequency", payment.frequency)?;
        check_metric(index, "success_rate", payment.success_rate)?;
    }
    Ok(())
}

fn check_amount(index: usize, amount: &BigDecimal) -> Result<(), InvalidRecordError> {
    if *amount < BigDecimal::zero() {
        return Err(InvalidRecordError::NegativeAmount {
            index,
            amount: amount.to_string(),
        });
    }
    Ok(())
}

fn check_metric(index: usize, field: &'static str, value: f64) -> Result<(), InvalidRecordError> {
    if !value.is_finite() {
        return Err(InvalidRecordError::NonFinite { index, field });
    }
    if value < 0.0 {
        return Err(InvalidRecordError::NegativeMetric { index, field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentState;
    use chrono::{Duration, TimeZone, Utc};

    fn record() -> PaymentRecord {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        PaymentRecord {
            request_id: "req".to_string(),
            payer: "0xaaa".to_string(),
            payee: "0xbbb".to_string(),
            amount: BigDecimal::from(5),
            created_at,
            paid_at: Some(created_at + Duration::days(2)),
            state: PaymentState::Paid,
        }
    }

    fn payment() -> PaymentData {
        PaymentData {
            amount: BigDecimal::from(10),
            time_to_pay_days: 3.0,
            is_on_time: true,
            frequency: 1.0,
            success_rate: 1.0,
        }
    }

    #[test]
    fn test_valid_records_pass() {
        assert!(validate_records(&[record(), record()]).is_ok());
        assert!(validate_records(&[]).is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut bad = record();
        bad.amount = BigDecimal::from(-3);
        let err = validate_records(&[record(), bad]).unwrap_err();
        assert_eq!(
            err,
            InvalidRecordError::NegativeAmount {
                index: 1,
                amount: "-3".to_string()
            }
        );
    }

    #[test]
    fn test_paid_before_created_rejected() {
        let mut bad = record();
        bad.paid_at = Some(bad.created_at - Duration::hours(1));
        assert_eq!(
            validate_records(&[bad]).unwrap_err(),
            InvalidRecordError::PaidBeforeCreated { index: 0 }
        );
    }

    #[test]
    fn test_blank_address_rejected() {
        let mut bad = record();
        bad.payee = "  ".to_string();
        assert_eq!(
            validate_records(&[bad]).unwrap_err(),
            InvalidRecordError::MissingAddress {
                index: 0,
                field: "payee"
            }
        );
    }

    #[test]
    fn test_non_finite_metric_rejected() {
        let mut bad = payment();
        bad.time_to_pay_days = f64::NAN;
        assert_eq!(
            validate_payment_data(&[payment(), bad]).unwrap_err(),
            InvalidRecordError::NonFinite {
                index: 1,
                field: "time_to_pay_days"
            }
        );

        let mut bad = payment();
        bad.frequency = f64::INFINITY;
        assert!(matches!(
            validate_payment_data(&[bad]),
            Err(InvalidRecordError::NonFinite { field: "frequency", .. })
        ));
    }

    #[test]
    fn test_negative_metric_rejected() {
        let mut bad = payment();
        bad.time_to_pay_days = -1.0;
        assert_eq!(
            validate_payment_data(&[bad]).unwrap_err(),
            InvalidRecordError::NegativeMetric {
                index: 0,
                field: "time_to_pay_days"
            }
        );
    }
}
