//! Category endpoints.

pub(crate) mod admin;
pub(crate) mod errors;
pub(crate) mod handlers;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use davenport_app::domain::categories::records::CategoryRecord;

/// Category Body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryBody {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_uuid: Option<Uuid>,
}

impl From<CategoryRecord> for CategoryBody {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name,
            slug: category.slug,
            description: category.description,
            image: category.image,
            parent_uuid: category.parent_uuid.map(Into::into),
        }
    }
}
