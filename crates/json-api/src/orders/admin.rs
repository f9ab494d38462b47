//! Admin order endpoints.

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use davenport_app::domain::{
    orders::records::{OrderDetail, OrderStatus, OrderUuid},
    pagination::PageRequest,
};

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        handlers::{OrderBody, OrderItemBody},
    },
    promotions::admin::PromotionBody,
    state::State,
};

/// Paginated order listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersPageResponse {
    pub orders: Vec<OrderBody>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

/// Admin order view with lines and the backing promotion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderBody,
    pub items: Vec<OrderItemBody>,
    pub promotion: Option<PromotionBody>,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            order: detail.order.into(),
            items: detail.items.into_iter().map(Into::into).collect(),
            promotion: detail.promotion.map(Into::into),
        }
    }
}

/// Order Status Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusRequest {
    pub status: String,
}

/// List Orders Handler
#[endpoint(tags("admin"), summary = "List Orders", security(("session" = [])))]
pub(crate) async fn index(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let listing = state
        .app
        .orders
        .list_orders(PageRequest::new(page.into_inner(), per_page.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersPageResponse {
        total_pages: listing.total_pages(),
        total: listing.total,
        page: listing.page,
        per_page: listing.per_page,
        orders: listing.items.into_iter().map(Into::into).collect(),
    }))
}

/// Get Order Handler
#[endpoint(tags("admin"), summary = "Get Order", security(("session" = [])))]
pub(crate) async fn get(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .orders
        .get_order(OrderUuid::from_uuid(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}

/// Update Order Status Handler
#[endpoint(tags("admin"), summary = "Update Order Status", security(("session" = [])))]
pub(crate) async fn update_status(
    order: PathParam<Uuid>,
    json: JsonBody<OrderStatusRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = OrderStatus::parse(&json.into_inner().status)
        .ok_or_else(|| StatusError::bad_request().brief("Invalid status"))?;

    state
        .app
        .orders
        .update_order_status(OrderUuid::from_uuid(order.into_inner()), status)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
