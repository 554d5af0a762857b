//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod item;
pub mod order;
pub mod promo;
pub mod sequence;
pub mod user;

pub use item::ItemEntity;
pub use order::OrderEntity;
pub use promo::PromoEntity;
pub use sequence::SequenceEntity;
pub use user::UserEntity;
