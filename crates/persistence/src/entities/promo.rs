//! Promotion entity (database row mapping).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database row mapping for the promos table.
#[derive(Debug, Clone, FromRow)]
pub struct PromoEntity {
    pub id: i32,
    pub promo_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub item_id: i32,
    pub promo_item_price: Decimal,
}

impl From<PromoEntity> for domain::models::PromotionConfig {
    fn from(entity: PromoEntity) -> Self {
        Self {
            id: entity.id,
            item_id: entity.item_id,
            promo_name: entity.promo_name,
            start_date: entity.start_date,
            end_date: entity.end_date,
            promo_item_price: entity.promo_item_price,
        }
    }
}
