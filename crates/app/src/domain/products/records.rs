//! Product Records

use jiff::Timestamp;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: u64,
    pub sale_price: Option<u64>,
    pub category_uuid: Option<CategoryUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    /// The price a cart line is charged at: the sale price when one is set,
    /// the regular price otherwise.
    #[must_use]
    pub fn effective_price(&self) -> u64 {
        self.sale_price.unwrap_or(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: u64, sale_price: Option<u64>) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            name: "Walnut Desk".to_string(),
            slug: "walnut-desk".to_string(),
            description: None,
            image: None,
            price,
            sale_price,
            category_uuid: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    #[test]
    fn effective_price_prefers_sale_price() {
        assert_eq!(product(200_000, Some(150_000)).effective_price(), 150_000);
    }

    #[test]
    fn effective_price_falls_back_to_price() {
        assert_eq!(product(200_000, None).effective_price(), 200_000);
    }
}
