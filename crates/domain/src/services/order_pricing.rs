//! Order pricing.
//!
//! Validates an order request against the item and its resolved promotion and
//! computes the unit and total price. Stock is not checked here; the
//! persistence layer decrements it atomically.

use rust_decimal::Decimal;

use crate::errors::BusinessError;
use crate::models::{Item, OrderQuote, PromotionView};

/// Default upper bound on units per order.
pub const DEFAULT_MAX_AMOUNT: i32 = 99;

/// Limits applied to a single order.
#[derive(Debug, Clone, Copy)]
pub struct OrderLimits {
    pub max_amount: i32,
}

impl Default for OrderLimits {
    fn default() -> Self {
        Self {
            max_amount: DEFAULT_MAX_AMOUNT,
        }
    }
}

/// Price an order for `amount` units of `item`.
///
/// `promo` is the item's resolved promotion (if any); `requested_promo_id` is
/// what the client asked to order through. Asking for a promotion that is not
/// the item's, or that is not running, is rejected rather than silently
/// falling back to the list price.
pub fn quote_order(
    item: &Item,
    promo: Option<&PromotionView>,
    requested_promo_id: Option<i32>,
    amount: i32,
    limits: OrderLimits,
) -> Result<OrderQuote, BusinessError> {
    if amount <= 0 || amount > limits.max_amount {
        return Err(BusinessError::invalid(format!(
            "Amount must be between 1 and {}",
            limits.max_amount
        )));
    }

    let unit_price = match requested_promo_id {
        None => item.price,
        Some(promo_id) => {
            let promo = promo
                .filter(|p| p.id == promo_id && p.item_id == item.id)
                .ok_or_else(|| BusinessError::invalid("Promotion does not match item"))?;
            if !promo.is_active() {
                return Err(BusinessError::invalid("Promotion is not active"));
            }
            promo.promo_item_price
        }
    };

    Ok(OrderQuote {
        item_id: item.id,
        promo_id: requested_promo_id,
        unit_price,
        amount,
        order_price: unit_price * Decimal::from(amount),
    })
}
