//! Admin category endpoints.

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use davenport_app::domain::categories::{
    data::{CategoryUpdate, NewCategory},
    records::CategoryUuid,
};

use crate::{
    categories::{CategoryBody, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Category payload accepted by create and update; the slug derives from the
/// name server-side.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_uuid: Option<Uuid>,
}

/// Create Category Handler
#[endpoint(tags("admin"), summary = "Create Category", security(("session" = [])))]
pub(crate) async fn create(
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let created = state
        .app
        .categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: request.name,
            description: request.description,
            image: request.image,
            parent_uuid: request.parent_uuid.map(CategoryUuid::from_uuid),
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

/// Update Category Handler
#[endpoint(tags("admin"), summary = "Update Category", security(("session" = [])))]
pub(crate) async fn update(
    category: PathParam<Uuid>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let updated = state
        .app
        .categories
        .update_category(
            CategoryUuid::from_uuid(category.into_inner()),
            CategoryUpdate {
                name: request.name,
                description: request.description,
                image: request.image,
                parent_uuid: request.parent_uuid.map(CategoryUuid::from_uuid),
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

/// Delete Category Handler
#[endpoint(tags("admin"), summary = "Delete Category", security(("session" = [])))]
pub(crate) async fn delete(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .categories
        .delete_category(CategoryUuid::from_uuid(category.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
