//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    orders::records::{
        OrderItemDetail, OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid,
    },
    pagination::PageRequest,
    products::{
        records::ProductUuid,
        repository::{try_amount_to_i64, try_get_amount},
    },
    users::records::UserUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const ORDER_CODE_EXISTS_SQL: &str = include_str!("sql/order_code_exists.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_BY_USER_SQL: &str = include_str!("sql/list_orders_by_user.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

pub(crate) struct NewOrderRow<'a> {
    pub(crate) uuid: OrderUuid,
    pub(crate) code: &'a str,
    pub(crate) user_uuid: Option<UserUuid>,
    pub(crate) name: &'a str,
    pub(crate) phone: &'a str,
    pub(crate) email: &'a str,
    pub(crate) address: &'a str,
    pub(crate) province_id: Option<i32>,
    pub(crate) district_id: Option<i32>,
    pub(crate) commune_id: Option<i32>,
    pub(crate) amount: u64,
    pub(crate) discount: u64,
    pub(crate) shipping_fee: u64,
    pub(crate) promotion_code: Option<&'a str>,
    pub(crate) note: Option<&'a str>,
}

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn order_code_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(ORDER_CODE_EXISTS_SQL)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrderRow<'_>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.code)
            .bind(order.user_uuid.map(UserUuid::into_uuid))
            .bind(order.name)
            .bind(order.phone)
            .bind(order.email)
            .bind(order.address)
            .bind(order.province_id)
            .bind(order.district_id)
            .bind(order.commune_id)
            .bind(try_amount_to_i64(order.amount, "amount")?)
            .bind(try_amount_to_i64(order.discount, "discount")?)
            .bind(try_amount_to_i64(order.shipping_fee, "shipping_fee")?)
            .bind(order.promotion_code)
            .bind(order.note)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &OrderItemRecord,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.order_uuid.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(&item.product_slug)
            .bind(try_amount_to_i64(item.unit_price, "unit_price")?)
            .bind(i64::from(item.quantity))
            .bind(try_amount_to_i64(item.amount, "amount")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Lines (joined with live product display fields) for a set of orders.
    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemDetail>, sqlx::Error> {
        let order_uuids: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderItemDetail>(LIST_ORDER_ITEMS_SQL)
            .bind(&order_uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_ORDERS_SQL).fetch_one(&mut **tx).await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn try_get_quantity(row: &PgRow) -> Result<u32, sqlx::Error> {
    let quantity: i32 = row.try_get("quantity")?;

    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = OrderStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown order status {status:?}").into(),
        })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            user_uuid: row
                .try_get::<Option<Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            address: row.try_get("address")?,
            province_id: row.try_get("province_id")?,
            district_id: row.try_get("district_id")?,
            commune_id: row.try_get("commune_id")?,
            status,
            amount: try_get_amount(row, "amount")?,
            discount: try_get_amount(row, "discount")?,
            shipping_fee: try_get_amount(row, "shipping_fee")?,
            promotion_code: row.try_get("promotion_code")?,
            note: row.try_get("note")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemDetail {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_slug: row.try_get("product_slug")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_quantity(row)?,
            amount: try_get_amount(row, "amount")?,
            product_name: row.try_get("product_name")?,
            product_image: row.try_get("product_image")?,
        })
    }
}
