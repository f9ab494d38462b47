//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use davenport_app::domain::{
    carts::data::NewCartItem, owner::OwnerContext, products::records::ProductUuid,
};

use crate::{
    auth::cart_session_cookie,
    carts::{errors::into_status_error, handlers::CartCountResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
}

/// Add Cart Item Handler
///
/// Adds a product to the caller's pending cart, minting an anonymous cart
/// session when the caller has none.
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let owner = match resolve_owner(req, state).await.owner_context() {
        Some(owner) => owner,
        None => {
            // First touch of the cart from this browser: mint a session.
            let session = Uuid::now_v7();

            res.add_cookie(cart_session_cookie(session));

            OwnerContext::Guest(session)
        }
    };

    let cart_count = state
        .app
        .carts
        .add_item(
            owner,
            NewCartItem {
                product_uuid: ProductUuid::from_uuid(request.product_uuid),
                quantity: request.quantity,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartCountResponse { cart_count }))
}

#[cfg(test)]
mod tests {
    use davenport_app::domain::carts::{CartsServiceError, MockCartsService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TestServices, service_with};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let mut services = TestServices::default();
        services.carts = carts;

        service_with(services, Router::with_path("cart").post(handler))
    }

    #[tokio::test]
    async fn anonymous_add_mints_a_session_cookie() -> TestResult {
        let product_uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |owner, item| {
                matches!(owner, OwnerContext::Guest(_))
                    && item.product_uuid.into_uuid() == product_uuid
                    && item.quantity == 2
            })
            .return_once(|_, _| Ok(2));

        let mut res = TestClient::post("http://example.com/cart")
            .json(&json!({ "product_uuid": product_uuid, "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let set_cookie = res
            .headers()
            .get("set-cookie")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        assert!(
            set_cookie.starts_with("cart_session="),
            "expected a minted cart session cookie, got {set_cookie:?}"
        );

        let body: CartCountResponse = res.take_json().await?;

        assert_eq!(body.cart_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn existing_session_cookie_is_reused() -> TestResult {
        let session = Uuid::now_v7();
        let product_uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |owner, _| *owner == OwnerContext::Guest(session))
            .return_once(|_, _| Ok(5));

        let mut res = TestClient::post("http://example.com/cart")
            .add_header("cookie", format!("cart_session={session}"), true)
            .json(&json!({ "product_uuid": product_uuid, "quantity": 3 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            res.headers().get("set-cookie").is_none(),
            "no new session should be minted"
        );

        let body: CartCountResponse = res.take_json().await?;

        assert_eq!(body.cart_count, 5);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "product_uuid": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn zero_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidData));

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "product_uuid": Uuid::now_v7(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
