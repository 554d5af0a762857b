//! Repository implementations for database operations.

pub mod item;
pub mod order;
pub mod promo;
pub mod user;

pub use item::ItemRepository;
pub use order::{OrderRepository, PlaceOrderOutcome};
pub use promo::PromoRepository;
pub use user::UserRepository;
