//! Order History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use davenport_app::domain::orders::records::OrderWithItems;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        handlers::{OrderBody, OrderItemBody},
    },
    state::State,
};

/// Order History Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderWithItemsBody>,
}

/// An order with its lines.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderWithItemsBody {
    #[serde(flatten)]
    pub order: OrderBody,
    pub items: Vec<OrderItemBody>,
}

impl From<OrderWithItems> for OrderWithItemsBody {
    fn from(order: OrderWithItems) -> Self {
        Self {
            order: order.order.into(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order History Handler
///
/// The authenticated customer's orders, newest first.
#[endpoint(tags("orders"), summary = "My Orders", security(("session" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders_for_user(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
