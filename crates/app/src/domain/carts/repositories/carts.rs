//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::records::{CartRecord, CartStatus, CartUuid},
    owner::OwnerContext,
    users::records::UserUuid,
};

const FIND_PENDING_BY_USER_SQL: &str = include_str!("../sql/find_pending_cart_by_user.sql");
const FIND_PENDING_BY_SESSION_SQL: &str = include_str!("../sql/find_pending_cart_by_session.sql");
const CREATE_USER_CART_SQL: &str = include_str!("../sql/create_user_cart.sql");
const CREATE_SESSION_CART_SQL: &str = include_str!("../sql/create_session_cart.sql");
const ASSIGN_CART_TO_USER_SQL: &str = include_str!("../sql/assign_cart_to_user.sql");
const MARK_CART_ORDERED_SQL: &str = include_str!("../sql/mark_cart_ordered.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_pending_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: OwnerContext,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        let (sql, uuid) = match owner {
            OwnerContext::User(user) => (FIND_PENDING_BY_USER_SQL, user.into_uuid()),
            OwnerContext::Guest(session) => (FIND_PENDING_BY_SESSION_SQL, session),
        };

        query_as::<Postgres, CartRecord>(sql)
            .bind(uuid)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find the owner's pending cart, creating it when absent. The insert
    /// races safely against concurrent creators via the partial unique
    /// indexes and `ON CONFLICT DO NOTHING`, after which the select sees
    /// whichever row won.
    pub(crate) async fn find_or_create_pending_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: OwnerContext,
    ) -> Result<CartRecord, sqlx::Error> {
        let (create_sql, find_sql, uuid) = match owner {
            OwnerContext::User(user) => {
                (CREATE_USER_CART_SQL, FIND_PENDING_BY_USER_SQL, user.into_uuid())
            }
            OwnerContext::Guest(session) => {
                (CREATE_SESSION_CART_SQL, FIND_PENDING_BY_SESSION_SQL, session)
            }
        };

        let created = query_as::<Postgres, CartRecord>(create_sql)
            .bind(Uuid::now_v7())
            .bind(uuid)
            .fetch_optional(&mut **tx)
            .await?;

        match created {
            Some(cart) => Ok(cart),
            None => {
                query_as::<Postgres, CartRecord>(find_sql)
                    .bind(uuid)
                    .fetch_one(&mut **tx)
                    .await
            }
        }
    }

    pub(crate) async fn assign_cart_to_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ASSIGN_CART_TO_USER_SQL)
            .bind(cart.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Conditional `pending -> ordered` transition. Zero rows affected means
    /// another checkout already consumed the cart.
    pub(crate) async fn mark_cart_ordered(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_CART_ORDERED_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = CartStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown cart status {status:?}").into(),
        })?;

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
