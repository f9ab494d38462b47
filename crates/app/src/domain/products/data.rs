//! Product Data

use crate::domain::{categories::records::CategoryUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: u64,
    pub sale_price: Option<u64>,
    pub category_uuid: Option<CategoryUuid>,
}

/// Product Update Data
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: u64,
    pub sale_price: Option<u64>,
    pub category_uuid: Option<CategoryUuid>,
}

/// Admin listing filter.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category_uuid: Option<CategoryUuid>,
}
