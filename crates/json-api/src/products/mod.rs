//! Product endpoints.

pub(crate) mod admin;
pub(crate) mod errors;
pub(crate) mod handlers;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use davenport_app::domain::products::records::ProductRecord;

/// Product Body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductBody {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: u64,
    pub sale_price: Option<u64>,
    pub category_uuid: Option<Uuid>,
}

impl From<ProductRecord> for ProductBody {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            slug: product.slug,
            description: product.description,
            image: product.image,
            price: product.price,
            sale_price: product.sale_price,
            category_uuid: product.category_uuid.map(Into::into),
        }
    }
}
