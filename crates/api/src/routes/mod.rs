//! HTTP route handlers.

pub mod health;
pub mod items;
pub mod orders;
pub mod promos;
pub mod users;
