//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemUuid, CartView},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        owner::OwnerContext,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(name = "carts.service.add_item", skip(self), err)]
    async fn add_item(
        &self,
        owner: OwnerContext,
        item: NewCartItem,
    ) -> Result<u64, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_or_create_pending_cart(&mut tx, owner)
            .await?;

        self.items_repository
            .upsert_cart_item(&mut tx, cart.uuid, item.product_uuid, item.quantity)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let count = self
            .items_repository
            .count_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn get_cart(
        &self,
        owner: OwnerContext,
        detail: bool,
    ) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.carts_repository.find_pending_cart(&mut tx, owner).await? else {
            tx.commit().await?;

            return Ok(CartView::empty(detail));
        };

        let count = self
            .items_repository
            .count_cart_items(&mut tx, cart.uuid)
            .await?;

        let items = if detail {
            Some(
                self.items_repository
                    .list_cart_items_detailed(&mut tx, cart.uuid)
                    .await?,
            )
        } else {
            None
        };

        tx.commit().await?;

        Ok(CartView { count, items })
    }

    #[tracing::instrument(name = "carts.service.update_item", skip(self), err)]
    async fn update_item(
        &self,
        owner: OwnerContext,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<u64, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_pending_cart(&mut tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .update_item_quantity(&mut tx, cart.uuid, item, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let count = self
            .items_repository
            .count_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(count)
    }

    #[tracing::instrument(name = "carts.service.remove_item", skip(self), err)]
    async fn remove_item(
        &self,
        owner: OwnerContext,
        item: CartItemUuid,
    ) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_pending_cart(&mut tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let count = self
            .items_repository
            .count_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(count)
    }

    #[tracing::instrument(name = "carts.service.merge_on_auth", skip(self), err)]
    async fn merge_on_auth(&self, session: Uuid, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(guest_cart) = self
            .carts_repository
            .find_pending_cart(&mut tx, OwnerContext::Guest(session))
            .await?
        else {
            tx.commit().await?;

            return Ok(());
        };

        let user_cart = self
            .carts_repository
            .find_pending_cart(&mut tx, OwnerContext::User(user))
            .await?;

        match user_cart {
            // The user has no cart of their own: adopt the guest cart wholesale.
            None => {
                self.carts_repository
                    .assign_cart_to_user(&mut tx, guest_cart.uuid, user)
                    .await?;
            }
            // Fold the guest lines into the user's cart, then drop the guest cart.
            Some(user_cart) => {
                self.items_repository
                    .merge_cart_items(&mut tx, guest_cart.uuid, user_cart.uuid)
                    .await?;

                self.items_repository
                    .delete_cart_items(&mut tx, guest_cart.uuid)
                    .await?;

                self.carts_repository
                    .delete_cart(&mut tx, guest_cart.uuid)
                    .await?;
            }
        }

        tx.commit().await?;

        info!(user_uuid = %user, "merged guest cart into user cart");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a product to the owner's pending cart, creating the cart lazily.
    /// Returns the cart's total item quantity.
    async fn add_item(
        &self,
        owner: OwnerContext,
        item: NewCartItem,
    ) -> Result<u64, CartsServiceError>;

    /// The owner's pending cart: total quantity, plus line details when
    /// `detail` is set. Owners without a cart see an empty view.
    async fn get_cart(
        &self,
        owner: OwnerContext,
        detail: bool,
    ) -> Result<CartView, CartsServiceError>;

    /// Set the quantity of a line in the owner's pending cart.
    async fn update_item(
        &self,
        owner: OwnerContext,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<u64, CartsServiceError>;

    /// Remove a line from the owner's pending cart.
    async fn remove_item(
        &self,
        owner: OwnerContext,
        item: CartItemUuid,
    ) -> Result<u64, CartsServiceError>;

    /// Reconcile a guest cart into a user cart at login/registration time.
    /// Invoked by the auth boundary, not by clients; callers treat failures
    /// as best-effort and must not fail the authentication itself.
    async fn merge_on_auth(&self, session: Uuid, user: UserUuid) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::products::records::ProductUuid, test::TestContext};

    use super::*;

    fn guest() -> OwnerContext {
        OwnerContext::Guest(Uuid::now_v7())
    }

    #[tokio::test]
    async fn adding_same_product_twice_sums_quantity_in_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest();

        let product = ctx.create_product("oak-table", 100_000).await?;

        let count = ctx
            .carts
            .add_item(
                owner,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        assert_eq!(count, 2);

        let count = ctx
            .carts
            .add_item(
                owner,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 3,
                },
            )
            .await?;

        assert_eq!(count, 5);

        let view = ctx.carts.get_cart(owner, true).await?;
        let items = view.items.unwrap_or_default();

        assert_eq!(items.len(), 1, "expected a single merged line");
        assert_eq!(items[0].quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_snapshots_sale_price() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest();

        let product = ctx
            .create_product_on_sale("walnut-desk", 200_000, 150_000)
            .await?;

        ctx.carts
            .add_item(
                owner,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 1,
                },
            )
            .await?;

        let view = ctx.carts.get_cart(owner, true).await?;
        let items = view.items.unwrap_or_default();

        assert_eq!(items[0].unit_price, 150_000);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_item(
                guest(),
                NewCartItem {
                    product_uuid: ProductUuid::new(),
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound for unknown product, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_item_zero_quantity_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_item(
                guest(),
                NewCartItem {
                    product_uuid: ProductUuid::new(),
                    quantity: 0,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_cart_without_cart_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let view = ctx.carts.get_cart(guest(), true).await?;

        assert_eq!(view.count, 0);
        assert_eq!(view.items.map(|items| items.len()), Some(0));

        Ok(())
    }

    #[tokio::test]
    async fn update_item_sets_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest();

        let product = ctx.create_product("oak-table", 100_000).await?;

        ctx.carts
            .add_item(
                owner,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        let view = ctx.carts.get_cart(owner, true).await?;
        let item_uuid = view.items.unwrap_or_default()[0].uuid;

        let count = ctx.carts.update_item(owner, item_uuid, 7).await?;

        assert_eq!(count, 7);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_for_other_owner_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest();

        let product = ctx.create_product("oak-table", 100_000).await?;

        ctx.carts
            .add_item(
                owner,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        let view = ctx.carts.get_cart(owner, true).await?;
        let item_uuid = view.items.unwrap_or_default()[0].uuid;

        let result = ctx.carts.update_item(guest(), item_uuid, 7).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound for foreign item, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_drops_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest();

        let product = ctx.create_product("oak-table", 100_000).await?;

        ctx.carts
            .add_item(
                owner,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        let view = ctx.carts.get_cart(owner, true).await?;
        let item_uuid = view.items.unwrap_or_default()[0].uuid;

        let count = ctx.carts.remove_item(owner, item_uuid).await?;

        assert_eq!(count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn merge_without_guest_cart_is_a_noop() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper@example.com").await?;

        ctx.carts.merge_on_auth(Uuid::now_v7(), user.uuid).await?;

        let view = ctx
            .carts
            .get_cart(OwnerContext::User(user.uuid), false)
            .await?;

        assert_eq!(view.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn merge_reassigns_guest_cart_when_user_has_none() -> TestResult {
        let ctx = TestContext::new().await;
        let session = Uuid::now_v7();
        let user = ctx.create_user("shopper@example.com").await?;

        let product = ctx.create_product("oak-table", 100_000).await?;

        ctx.carts
            .add_item(
                OwnerContext::Guest(session),
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        ctx.carts.merge_on_auth(session, user.uuid).await?;

        let user_view = ctx
            .carts
            .get_cart(OwnerContext::User(user.uuid), false)
            .await?;

        assert_eq!(user_view.count, 2);

        let guest_view = ctx
            .carts
            .get_cart(OwnerContext::Guest(session), false)
            .await?;

        assert_eq!(guest_view.count, 0, "guest cart should be gone");

        Ok(())
    }

    #[tokio::test]
    async fn merge_unions_items_and_sums_shared_products() -> TestResult {
        let ctx = TestContext::new().await;
        let session = Uuid::now_v7();
        let user = ctx.create_user("shopper@example.com").await?;

        let shared = ctx.create_product("oak-table", 100_000).await?;
        let guest_only = ctx.create_product("pine-chair", 50_000).await?;
        let user_only = ctx.create_product("walnut-desk", 150_000).await?;

        ctx.carts
            .add_item(
                OwnerContext::User(user.uuid),
                NewCartItem {
                    product_uuid: shared.uuid,
                    quantity: 1,
                },
            )
            .await?;

        ctx.carts
            .add_item(
                OwnerContext::User(user.uuid),
                NewCartItem {
                    product_uuid: user_only.uuid,
                    quantity: 1,
                },
            )
            .await?;

        ctx.carts
            .add_item(
                OwnerContext::Guest(session),
                NewCartItem {
                    product_uuid: shared.uuid,
                    quantity: 2,
                },
            )
            .await?;

        ctx.carts
            .add_item(
                OwnerContext::Guest(session),
                NewCartItem {
                    product_uuid: guest_only.uuid,
                    quantity: 3,
                },
            )
            .await?;

        ctx.carts.merge_on_auth(session, user.uuid).await?;

        let view = ctx
            .carts
            .get_cart(OwnerContext::User(user.uuid), true)
            .await?;

        let items = view.items.unwrap_or_default();

        assert_eq!(items.len(), 3, "expected the union of both carts");

        let quantity_of = |slug: &str| {
            items
                .iter()
                .find(|item| item.slug == slug)
                .map(|item| item.quantity)
        };

        assert_eq!(quantity_of("oak-table"), Some(3), "shared quantities sum");
        assert_eq!(quantity_of("pine-chair"), Some(3));
        assert_eq!(quantity_of("walnut-desk"), Some(1));

        let guest_view = ctx
            .carts
            .get_cart(OwnerContext::Guest(session), false)
            .await?;

        assert_eq!(guest_view.count, 0, "guest cart no longer exists");

        Ok(())
    }
}
