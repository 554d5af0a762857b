//! Promotion domain models.
//!
//! A promotion is a time-bounded discounted price offer tied to one catalog
//! item. The persisted [`PromotionConfig`] never carries a status; the status
//! lives only on the request-scoped [`PromotionView`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Decimal places kept for stored prices.
pub const PRICE_SCALE: u32 = 2;

/// Temporal status of a promotion relative to a given instant.
///
/// Serialized as its integer code (1 = not started, 2 = active, 3 = ended).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum PromoStatus {
    NotStarted,
    Active,
    Ended,
}

impl PromoStatus {
    /// Classifies `now` against the closed window `[start, end]`.
    ///
    /// Both boundaries count as active.
    pub fn at(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if now < start {
            PromoStatus::NotStarted
        } else if now > end {
            PromoStatus::Ended
        } else {
            PromoStatus::Active
        }
    }

    pub fn code(&self) -> i16 {
        match self {
            PromoStatus::NotStarted => 1,
            PromoStatus::Active => 2,
            PromoStatus::Ended => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromoStatus::NotStarted => "not_started",
            PromoStatus::Active => "active",
            PromoStatus::Ended => "ended",
        }
    }
}

impl From<PromoStatus> for i16 {
    fn from(status: PromoStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i16> for PromoStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PromoStatus::NotStarted),
            2 => Ok(PromoStatus::Active),
            3 => Ok(PromoStatus::Ended),
            other => Err(format!("Invalid promotion status: {}", other)),
        }
    }
}

impl std::fmt::Display for PromoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persisted promotion configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionConfig {
    pub id: i32,
    pub item_id: i32,
    pub promo_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub promo_item_price: Decimal,
}

/// Promotion annotated with its status at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionView {
    pub id: i32,
    pub item_id: i32,
    pub promo_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub promo_item_price: Decimal,
    pub status: PromoStatus,
}

impl PromotionView {
    /// Projects a stored configuration onto a view, evaluating its status at `now`.
    pub fn from_config(config: PromotionConfig, now: DateTime<Utc>) -> Self {
        let status = PromoStatus::at(now, config.start_date, config.end_date);
        Self {
            id: config.id,
            item_id: config.item_id,
            promo_name: config.promo_name,
            start_date: config.start_date,
            end_date: config.end_date,
            promo_item_price: config.promo_item_price,
            status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PromoStatus::Active
    }
}

/// Request to create a promotion for an item.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_promo_window"))]
pub struct NewPromotion {
    #[validate(range(min = 1, message = "Item id must be positive"))]
    pub item_id: i32,

    #[validate(length(min = 1, max = 64, message = "Promotion name must be 1-64 characters"))]
    pub promo_name: String,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    #[validate(custom(function = "validate_positive_price"))]
    pub promo_item_price: Decimal,
}

fn validate_promo_window(promo: &NewPromotion) -> Result<(), ValidationError> {
    if promo.end_date > promo.start_date {
        Ok(())
    } else {
        let mut err = ValidationError::new("promo_window");
        err.message = Some("Promotion end date must be after its start date".into());
        Err(err)
    }
}

/// Prices must be strictly positive.
pub fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if !price.is_sign_positive() || price.is_zero() {
        let mut err = ValidationError::new("price_positive");
        err.message = Some("Price must be greater than zero".into());
        return Err(err);
    }
    // Prices are stored as NUMERIC(12,2); extra digits would be rounded away.
    if price.normalize().scale() > PRICE_SCALE {
        let mut err = ValidationError::new("price_scale");
        err.message = Some("Price can have at most two decimal places".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn config() -> PromotionConfig {
        PromotionConfig {
            id: 7,
            item_id: 42,
            promo_name: "Flash sale".to_string(),
            start_date: ts(2024, 1, 10, 0, 0, 0),
            end_date: ts(2024, 1, 20, 0, 0, 0),
            promo_item_price: Decimal::new(999, 2),
        }
    }

    #[test]
    fn test_status_before_start() {
        let c = config();
        assert_eq!(
            PromoStatus::at(ts(2024, 1, 9, 23, 59, 59), c.start_date, c.end_date),
            PromoStatus::NotStarted
        );
    }

    #[test]
    fn test_status_boundaries_are_active() {
        let c = config();
        assert_eq!(
            PromoStatus::at(c.start_date, c.start_date, c.end_date),
            PromoStatus::Active
        );
        assert_eq!(
            PromoStatus::at(c.end_date, c.start_date, c.end_date),
            PromoStatus::Active
        );
    }

    #[test]
    fn test_status_after_end() {
        let c = config();
        assert_eq!(
            PromoStatus::at(ts(2024, 1, 20, 0, 0, 1), c.start_date, c.end_date),
            PromoStatus::Ended
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PromoStatus::NotStarted.code(), 1);
        assert_eq!(PromoStatus::Active.code(), 2);
        assert_eq!(PromoStatus::Ended.code(), 3);
        assert_eq!(PromoStatus::try_from(2), Ok(PromoStatus::Active));
        assert!(PromoStatus::try_from(0).is_err());
    }

    #[test]
    fn test_status_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&PromoStatus::Active).unwrap(), "2");
        let parsed: PromoStatus = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, PromoStatus::Ended);
    }

    #[test]
    fn test_view_copies_every_field() {
        let now = ts(2024, 1, 15, 0, 0, 0);
        let view = PromotionView::from_config(config(), now);
        assert_eq!(view.id, 7);
        assert_eq!(view.item_id, 42);
        assert_eq!(view.promo_name, "Flash sale");
        assert_eq!(view.start_date, ts(2024, 1, 10, 0, 0, 0));
        assert_eq!(view.end_date, ts(2024, 1, 20, 0, 0, 0));
        assert_eq!(view.promo_item_price, Decimal::new(999, 2));
        assert_eq!(view.status, PromoStatus::Active);
        assert!(view.is_active());
    }

    #[test]
    fn test_view_json_shape() {
        let view = PromotionView::from_config(config(), ts(2024, 1, 5, 0, 0, 0));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["itemId"], 42);
        assert_eq!(json["promoName"], "Flash sale");
        assert_eq!(json["promoItemPrice"], "9.99");
        assert_eq!(json["status"], 1);
    }

    #[test]
    fn test_new_promotion_validation() {
        let promo = NewPromotion {
            item_id: 1,
            promo_name: "Launch".to_string(),
            start_date: ts(2024, 1, 1, 0, 0, 0),
            end_date: ts(2024, 1, 2, 0, 0, 0),
            promo_item_price: Decimal::new(100, 2),
        };
        assert!(promo.validate().is_ok());
    }

    #[test]
    fn test_new_promotion_rejects_inverted_window() {
        let promo = NewPromotion {
            item_id: 1,
            promo_name: "Backwards".to_string(),
            start_date: ts(2024, 1, 2, 0, 0, 0),
            end_date: ts(2024, 1, 1, 0, 0, 0),
            promo_item_price: Decimal::new(100, 2),
        };
        assert!(promo.validate().is_err());
    }

    #[test]
    fn test_new_promotion_rejects_free_price() {
        let promo = NewPromotion {
            item_id: 1,
            promo_name: "Free".to_string(),
            start_date: ts(2024, 1, 1, 0, 0, 0),
            end_date: ts(2024, 1, 2, 0, 0, 0),
            promo_item_price: Decimal::ZERO,
        };
        assert!(promo.validate().is_err());
    }

    #[test]
    fn test_validate_positive_price() {
        assert!(validate_positive_price(&Decimal::new(1, 2)).is_ok());
        assert!(validate_positive_price(&Decimal::ZERO).is_err());
        assert!(validate_positive_price(&Decimal::new(-5, 0)).is_err());
    }

    #[test]
    fn test_price_scale_limited_to_cents() {
        let err = validate_positive_price(&Decimal::new(9999, 3)).unwrap_err();
        assert_eq!(err.code, "price_scale");
        // Trailing zeros are not extra precision.
        assert!(validate_positive_price(&Decimal::new(10500, 3)).is_ok());
        assert!(validate_positive_price(&Decimal::new(999, 2)).is_ok());
    }
}
