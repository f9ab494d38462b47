//! Place Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use davenport_app::domain::orders::data::NewOrder;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub province_id: Option<i32>,
    pub district_id: Option<i32>,
    pub commune_id: Option<i32>,
    pub note: Option<String>,
    /// Re-validated server-side; the client never supplies a discount amount
    pub promotion_code: Option<String>,
}

/// Place Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderResponse {
    pub order_uuid: Uuid,
    pub order_code: String,
}

/// Place Order Handler
///
/// Turns the caller's pending cart into an immutable order.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart missing/empty, bad shipping fields, or inapplicable promotion"),
        (status_code = StatusCode::CONFLICT, description = "Cart already checked out or promotion exhausted; retry"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PlaceOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let owner = resolve_owner(req, state)
        .await
        .owner_context()
        .ok_or_else(|| StatusError::bad_request().brief("Cart not found"))?;

    let placed = state
        .app
        .orders
        .place_order(
            owner,
            NewOrder {
                name: request.name,
                phone: request.phone,
                email: request.email,
                address: request.address,
                province_id: request.province_id,
                district_id: request.district_id,
                commune_id: request.commune_id,
                note: request.note,
                promotion_code: request.promotion_code,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(PlaceOrderResponse {
        order_uuid: placed.uuid.into_uuid(),
        order_code: placed.code,
    }))
}
