//! Domain models for promo-shop.

pub mod item;
pub mod order;
pub mod promo;
pub mod user;

pub use item::{Item, ItemView, NewItem};
pub use order::{Order, OrderQuote};
pub use promo::{NewPromotion, PromoStatus, PromotionConfig, PromotionView};
pub use user::{NewUser, User, UserView, REGISTER_MODE_PHONE};
