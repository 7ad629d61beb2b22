//! Next-payment prediction from historical payment timing

use chrono::{DateTime, Duration, Utc};

use crate::models::PaymentData;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Mean change in time-to-pay between consecutive payments, in days.
///
/// `None` when fewer than two payments exist.
pub fn average_interval_days(payments: &[PaymentData]) -> Option<f64> {
    if payments.len() < 2 {
        return None;
    }
    let intervals: Vec<f64> = payments
        .windows(2)
        .map(|w| w[1].time_to_pay_days - w[0].time_to_pay_days)
        .collect();
    Some(intervals.iter().sum::<f64>() / intervals.len() as f64)
}

/// Predict the next payment date relative to `now`.
///
/// With fewer than two payments there is nothing to extrapolate and `now`
/// itself is returned. A negative average interval yields a date before
/// `now`. Intervals reaching past the representable calendar saturate at
/// its bounds.
pub fn predict_next_payment(payments: &[PaymentData], now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(days) = average_interval_days(payments) else {
        return now;
    };

    // `as` saturates at the i64 bounds
    let millis = (days * MILLIS_PER_DAY).round() as i64;
    Duration::try_milliseconds(millis)
        .and_then(|offset| now.checked_add_signed(offset))
        .unwrap_or(if days > 0.0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}
