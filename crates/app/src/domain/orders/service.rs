//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{PgCartItemsRepository, PgCartsRepository},
        orders::{
            code::generate_order_code,
            data::NewOrder,
            errors::OrdersServiceError,
            records::{
                OrderDetail, OrderItemDetail, OrderItemRecord, OrderItemUuid, OrderRecord,
                OrderStatus, OrderUuid, OrderWithItems, PlacedOrder,
            },
            repository::{NewOrderRow, PgOrdersRepository},
        },
        owner::OwnerContext,
        pagination::{Page, PageRequest},
        promotions::{PgPromotionsRepository, records::PromotionRecord, validation},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    promotions_repository: PgPromotionsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            promotions_repository: PgPromotionsRepository::new(),
        }
    }

    fn new_order_code(now: Timestamp) -> String {
        let mut rng = rand::thread_rng();

        generate_order_code(now, &mut rng)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, order),
        fields(
            order_uuid = tracing::field::Empty,
            order_code = tracing::field::Empty,
            promotion_code = tracing::field::Empty,
        ),
        err
    )]
    async fn place_order(
        &self,
        owner: OwnerContext,
        order: NewOrder,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        if order.name.trim().is_empty()
            || order.phone.trim().is_empty()
            || order.email.trim().is_empty()
            || order.address.trim().is_empty()
        {
            return Err(OrdersServiceError::InvalidData);
        }

        let now = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_pending_cart(&mut tx, owner)
            .await?
            .ok_or(OrdersServiceError::CartNotFound)?;

        // Detailed lines carry the product slug for the per-line snapshot.
        let cart_items = self
            .items_repository
            .list_cart_items_detailed(&mut tx, cart.uuid)
            .await?;

        if cart_items.is_empty() {
            return Err(OrdersServiceError::CartEmpty);
        }

        // Subtotal comes from the prices snapshotted at add-to-cart time.
        let subtotal: u64 = cart_items
            .iter()
            .map(|item| item.unit_price * u64::from(item.quantity))
            .sum();

        // Client-side discounts are never trusted; the code is re-validated
        // against the freshly computed subtotal.
        let promotion = self
            .resolve_promotion(&mut tx, order.promotion_code.as_deref(), subtotal, now)
            .await?;

        let discount = promotion.as_ref().map_or(0, |(_, discount)| *discount);
        let shipping_fee = 0; // shipping computation is not implemented

        let mut code = Self::new_order_code(now);

        // One regeneration on collision; beyond that the unique index decides.
        if self.orders_repository.order_code_exists(&mut tx, &code).await? {
            code = Self::new_order_code(Timestamp::now());
        }

        let order_row = self
            .orders_repository
            .create_order(
                &mut tx,
                &NewOrderRow {
                    uuid: OrderUuid::new(),
                    code: &code,
                    user_uuid: owner.user_uuid(),
                    name: order.name.trim(),
                    phone: order.phone.trim(),
                    email: order.email.trim(),
                    address: order.address.trim(),
                    province_id: order.province_id,
                    district_id: order.district_id,
                    commune_id: order.commune_id,
                    amount: subtotal - discount + shipping_fee,
                    discount,
                    shipping_fee,
                    promotion_code: promotion
                        .as_ref()
                        .map(|(record, _)| record.code.as_str()),
                    note: order.note.as_deref(),
                },
            )
            .await?;

        for item in &cart_items {
            self.orders_repository
                .create_order_item(
                    &mut tx,
                    &OrderItemRecord {
                        uuid: OrderItemUuid::new(),
                        order_uuid: order_row.uuid,
                        product_uuid: item.product_uuid,
                        product_slug: item.slug.clone(),
                        unit_price: item.unit_price,
                        quantity: item.quantity,
                        amount: item.unit_price * u64::from(item.quantity),
                    },
                )
                .await?;
        }

        // Conditional pending -> ordered flip; losing it means a concurrent
        // checkout already consumed this cart.
        let flipped = self
            .carts_repository
            .mark_cart_ordered(&mut tx, cart.uuid)
            .await?;

        if flipped == 0 {
            return Err(OrdersServiceError::CartConflict);
        }

        if let Some((record, _)) = &promotion {
            self.promotions_repository
                .create_usage(&mut tx, record.uuid, order_row.uuid, order.phone.trim())
                .await?;
        }

        tx.commit().await?;

        let span = tracing::Span::current();

        span.record("order_uuid", tracing::field::display(order_row.uuid));
        span.record("order_code", tracing::field::display(&order_row.code));

        if let Some((record, _)) = &promotion {
            span.record("promotion_code", tracing::field::display(&record.code));
        }

        info!(order_uuid = %order_row.uuid, order_code = %order_row.code, "placed order");

        Ok(PlacedOrder {
            uuid: order_row.uuid,
            code: order_row.code,
        })
    }

    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderWithItems>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .orders_repository
            .list_orders_by_user(&mut tx, user)
            .await?;

        let order_uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self
            .orders_repository
            .list_order_items(&mut tx, &order_uuids)
            .await?;

        tx.commit().await?;

        Ok(group_items(orders, items))
    }

    async fn list_orders(
        &self,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.orders_repository.list_orders(&mut tx, page).await?;
        let total = self.orders_repository.count_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or(0),
            page: page.page,
            per_page: page.per_page,
        })
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetail, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.orders_repository.get_order(&mut tx, order).await?;

        let items = self
            .orders_repository
            .list_order_items(&mut tx, &[record.uuid])
            .await?;

        let promotion = match &record.promotion_code {
            Some(code) => self.promotions_repository.find_by_code(&mut tx, code).await?,
            None => None,
        };

        tx.commit().await?;

        Ok(OrderDetail {
            order: record,
            items,
            promotion,
        })
    }

    #[tracing::instrument(name = "orders.service.update_order_status", skip(self), err)]
    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .orders_repository
            .update_order_status(&mut tx, order, status)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

impl PgOrdersService {
    /// Resolve and redeem the supplied promotion code inside the checkout
    /// transaction. The usage increment is an atomic conditional update, so a
    /// lost race surfaces as [`OrdersServiceError::PromotionConflict`] rather
    /// than over-redeeming.
    async fn resolve_promotion(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        code: Option<&str>,
        subtotal: u64,
        now: Timestamp,
    ) -> Result<Option<(PromotionRecord, u64)>, OrdersServiceError> {
        let Some(code) = code.map(str::trim).filter(|code| !code.is_empty()) else {
            return Ok(None);
        };

        let promotion = self
            .promotions_repository
            .find_active_by_code(tx, code)
            .await?
            .ok_or(OrdersServiceError::Promotion(
                validation::PromotionRejection::UnknownCode,
            ))?;

        let discount = validation::evaluate(&promotion, subtotal, now)
            .map_err(OrdersServiceError::Promotion)?;

        let redeemed = self
            .promotions_repository
            .increment_usage(tx, promotion.uuid)
            .await?;

        if redeemed == 0 {
            return Err(OrdersServiceError::PromotionConflict);
        }

        Ok(Some((promotion, discount)))
    }
}

fn group_items(orders: Vec<OrderRecord>, items: Vec<OrderItemDetail>) -> Vec<OrderWithItems> {
    let mut by_order: HashMap<OrderUuid, Vec<_>> = HashMap::new();

    for item in items {
        by_order.entry(item.order_uuid).or_default().push(item);
    }

    orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.uuid).unwrap_or_default();

            OrderWithItems { order, items }
        })
        .collect()
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order from the owner's pending cart, as one atomic unit:
    /// order + items inserted, cart consumed, promotion redeemed and audited.
    async fn place_order(
        &self,
        owner: OwnerContext,
        order: NewOrder,
    ) -> Result<PlacedOrder, OrdersServiceError>;

    /// A customer's order history, newest first, with line details.
    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderWithItems>, OrdersServiceError>;

    /// Paginated admin listing, newest first.
    async fn list_orders(&self, page: PageRequest)
    -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// Admin order view with items and the backing promotion, if any.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetail, OrdersServiceError>;

    /// Admin status transition.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError>;
}
