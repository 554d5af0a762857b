//! Catalog item models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::promo::{validate_positive_price, PromoStatus, PromotionView};

/// Format used for `promoStartDate` in item responses.
pub const PROMO_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A catalog item with its stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i32,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub stock: i32,
    pub sales: i32,
    pub img_url: String,
}

/// Request to create a catalog item.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[validate(length(min = 1, max = 128, message = "Title is required"))]
    pub title: String,

    #[validate(custom(function = "validate_positive_price"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[validate(length(min = 1, max = 500, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, max = 512, message = "Image URL is required"))]
    pub img_url: String,
}

/// Item as rendered to clients, with promotion fields flattened in.
///
/// `promo_status` is 0 when there is no upcoming or running promotion,
/// otherwise the promotion status code (1 or 2).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i32,
    pub title: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    pub sales: i32,
    pub img_url: String,
    pub promo_status: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_start_date: Option<String>,
}

impl ItemView {
    /// Builds the view; an ended promotion is dropped.
    pub fn new(item: Item, promo: Option<&PromotionView>) -> Self {
        let promo = promo.filter(|p| p.status != PromoStatus::Ended);
        Self {
            id: item.id,
            title: item.title,
            price: item.price,
            stock: item.stock,
            description: item.description,
            sales: item.sales,
            img_url: item.img_url,
            promo_status: promo.map(|p| p.status.code()).unwrap_or(0),
            promo_price: promo.map(|p| p.promo_item_price),
            promo_id: promo.map(|p| p.id),
            promo_start_date: promo.map(|p| p.start_date.format(PROMO_DATE_FORMAT).to_string()),
        }
    }
}
