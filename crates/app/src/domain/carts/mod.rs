//! Carts.

pub mod data;
mod errors;
pub mod records;
mod repositories;
mod service;

pub use errors::CartsServiceError;
pub(crate) use repositories::{PgCartItemsRepository, PgCartsRepository};
pub use service::{CartsService, MockCartsService, PgCartsService};
