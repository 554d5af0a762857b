//! Domain layer for the promo-shop backend.
//!
//! This crate contains:
//! - Domain models (Promotion, Item, User, Order)
//! - Business logic services (promotion resolution, order pricing)
//! - Business error codes

pub mod errors;
pub mod models;
pub mod services;

pub use errors::BusinessError;
