//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use davenport_app::domain::carts::records::CartItemUuid;

use crate::{
    carts::{errors::into_status_error, handlers::CartCountResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    pub quantity: u32,
}

/// Update Cart Item Handler
///
/// Sets the quantity of a line in the caller's pending cart.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
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
        .update_item(
            owner,
            CartItemUuid::from_uuid(item.into_inner()),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartCountResponse { cart_count }))
}

#[cfg(test)]
mod tests {
    use davenport_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        owner::OwnerContext,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TestServices, service_with};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let mut services = TestServices::default();
        services.carts = carts;

        service_with(services, Router::with_path("cart/items/{item}").put(handler))
    }

    #[tokio::test]
    async fn update_returns_fresh_count() -> TestResult {
        let session = Uuid::now_v7();
        let item = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(move |owner, item_uuid, quantity| {
                *owner == OwnerContext::Guest(session)
                    && item_uuid.into_uuid() == item
                    && *quantity == 7
            })
            .return_once(|_, _, _| Ok(7));

        let body: CartCountResponse =
            TestClient::put(format!("http://example.com/cart/items/{item}"))
                .add_header("cookie", format!("cart_session={session}"), true)
                .json(&json!({ "quantity": 7 }))
                .send(&make_service(carts))
                .await
                .take_json()
                .await?;

        assert_eq!(body.cart_count, 7);

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_caller_gets_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_update_item().never();

        let res = TestClient::put(format!("http://example.com/cart/items/{}", Uuid::now_v7()))
            .json(&json!({ "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn missing_item_returns_404() -> TestResult {
        let session = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/cart/items/{}", Uuid::now_v7()))
            .add_header("cookie", format!("cart_session={session}"), true)
            .json(&json!({ "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
