//! Categories.

pub mod data;
mod errors;
pub mod records;
mod repository;
mod service;

pub use errors::CategoriesServiceError;
pub use service::{CategoriesService, MockCategoriesService, PgCategoriesService};
