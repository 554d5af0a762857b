//! Order entity (database row mapping).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database row mapping for the orders table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderEntity {
    pub id: String,
    pub user_id: i32,
    pub item_id: i32,
    pub promo_id: Option<i32>,
    pub item_price: Decimal,
    pub amount: i32,
    pub order_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<OrderEntity> for domain::models::Order {
    fn from(entity: OrderEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            item_id: entity.item_id,
            promo_id: entity.promo_id,
            item_price: entity.item_price,
            amount: entity.amount,
            order_price: entity.order_price,
            created_at: entity.created_at,
        }
    }
}
