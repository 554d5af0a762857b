//! Domain services for promo-shop.
//!
//! Services contain business logic that operates on domain models.

pub mod order_pricing;
pub mod promo_resolution;

pub use order_pricing::{quote_order, OrderLimits};
pub use promo_resolution::{
    resolve_promotion, InMemoryPromotionStore, PromotionResolver, PromotionStore,
};
