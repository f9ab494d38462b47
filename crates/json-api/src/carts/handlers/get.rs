//! Get Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use davenport_app::domain::carts::records::{CartItemDetail, CartView};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Total quantity across all lines
    pub cart_count: u64,

    /// Lines, present when detail was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<CartItemBody>>,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            cart_count: view.count,
            items: view
                .items
                .map(|items| items.into_iter().map(CartItemBody::from).collect()),
        }
    }
}

/// Cart Item Body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemBody {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u32,
    /// Unit price snapshotted when the item was added
    pub unit_price: u64,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    /// Current live prices, for "price changed" hints
    pub price: u64,
    pub sale_price: Option<u64>,
}

impl From<CartItemDetail> for CartItemBody {
    fn from(item: CartItemDetail) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            name: item.name,
            slug: item.slug,
            image: item.image,
            price: item.price,
            sale_price: item.sale_price,
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's pending cart; anonymous callers get an empty one.
#[endpoint(tags("cart"), summary = "Get Cart")]
pub(crate) async fn handler(
    detail: QueryParam<bool, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let detail = detail.into_inner().unwrap_or(false);

    let Some(owner) = resolve_owner(req, state).await.owner_context() else {
        return Ok(Json(CartView::empty(detail).into()));
    };

    let view = state
        .app
        .carts
        .get_cart(owner, detail)
        .await
        .map_err(into_status_error)?;

    Ok(Json(view.into()))
}
