//! Order models and order-number formatting.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of sequence digits in an order number.
const SEQUENCE_DIGITS: usize = 6;

/// A placed order.
///
/// When `promo_id` is set the order was placed through a running promotion
/// and both prices are the promotional ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: i32,
    pub item_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_id: Option<i32>,
    pub item_price: Decimal,
    pub amount: i32,
    pub order_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Priced order line, computed before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuote {
    pub item_id: i32,
    pub promo_id: Option<i32>,
    pub unit_price: Decimal,
    pub amount: i32,
    pub order_price: Decimal,
}

/// Builds a 16-character order number: `yyyyMMdd`, a zero-padded
/// six-digit sequence, then a two-digit shard suffix taken from the user id.
pub fn format_order_number(now: DateTime<Utc>, sequence: i32, user_id: i32) -> String {
    let sequence = sequence.rem_euclid(10_i32.pow(SEQUENCE_DIGITS as u32));
    format!(
        "{}{:0width$}{:02}",
        now.format("%Y%m%d"),
        sequence,
        user_id.rem_euclid(100),
        width = SEQUENCE_DIGITS
    )
}

/// Advances a sequence, wrapping back to `init_value` once `max_value` is passed.
pub fn next_sequence_value(current: i32, step: i32, init_value: i32, max_value: i32) -> i32 {
    match current.checked_add(step) {
        Some(next) if next <= max_value => next,
        _ => init_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_order_number() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let number = format_order_number(now, 42, 7);
        assert_eq!(number, "2024011500004207");
        assert_eq!(number.len(), 16);
    }

    #[test]
    fn test_format_order_number_shard_suffix() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(format_order_number(now, 999_999, 1234), "2024123199999934");
    }

    #[test]
    fn test_format_order_number_truncates_sequence() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_order_number(now, 1_000_001, 0).len(), 16);
    }

    #[test]
    fn test_next_sequence_value() {
        assert_eq!(next_sequence_value(0, 1, 0, 999_999), 1);
        assert_eq!(next_sequence_value(999_998, 1, 0, 999_999), 999_999);
        assert_eq!(next_sequence_value(999_999, 1, 0, 999_999), 0);
        assert_eq!(next_sequence_value(i32::MAX, 1, 5, i32::MAX), 5);
    }
}
