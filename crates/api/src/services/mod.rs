//! Application services orchestrating repositories and domain logic.

pub mod catalog;
pub mod orders;
pub mod users;

pub use catalog::{CatalogError, CatalogService};
pub use orders::{OrderRequest, OrderService, OrderServiceError};
pub use users::{UserService, UserServiceError};
