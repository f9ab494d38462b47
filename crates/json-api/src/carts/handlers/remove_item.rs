//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use davenport_app::domain::carts::records::CartItemUuid;

use crate::{
    carts::{errors::into_status_error, handlers::CartCountResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removes a line from the caller's pending cart.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let owner = resolve_owner(req, state)
        .await
        .owner_context()
        .ok_or_else(|| StatusError::not_found().brief("Cart not found"))?;

    let cart_count = state
        .app
        .carts
        .remove_item(owner, CartItemUuid::from_uuid(item.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartCountResponse { cart_count }))
}
