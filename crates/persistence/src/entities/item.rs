//! Item entity (database row mapping).

use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database row mapping for the items table.
#[derive(Debug, Clone, FromRow)]
pub struct ItemEntity {
    pub id: i32,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub stock: i32,
    pub sales: i32,
    pub img_url: String,
}

impl From<ItemEntity> for domain::models::Item {
    fn from(entity: ItemEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            price: entity.price,
            description: entity.description,
            stock: entity.stock,
            sales: entity.sales,
            img_url: entity.img_url,
        }
    }
}
