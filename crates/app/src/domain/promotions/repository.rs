//! Promotions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    orders::records::OrderUuid,
    pagination::PageRequest,
    products::repository::{try_amount_to_i64, try_get_amount, try_get_optional_amount,
        try_optional_amount_to_i64},
    promotions::{
        data::{NewPromotion, PromotionUpdate},
        records::{PromotionKind, PromotionRecord, PromotionStatus, PromotionUuid},
    },
};

const FIND_ACTIVE_BY_CODE_SQL: &str = include_str!("sql/find_active_promotion_by_code.sql");
const FIND_BY_CODE_SQL: &str = include_str!("sql/find_promotion_by_code.sql");
const GET_PROMOTION_SQL: &str = include_str!("sql/get_promotion.sql");
const LIST_PROMOTIONS_SQL: &str = include_str!("sql/list_promotions.sql");
const COUNT_PROMOTIONS_SQL: &str = include_str!("sql/count_promotions.sql");
const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const UPDATE_PROMOTION_SQL: &str = include_str!("sql/update_promotion.sql");
const DELETE_PROMOTION_SQL: &str = include_str!("sql/delete_promotion.sql");
const INCREMENT_USAGE_SQL: &str = include_str!("sql/increment_promotion_usage.sql");
const CREATE_USAGE_SQL: &str = include_str!("sql/create_promotion_usage.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Case-insensitive lookup over active promotions only.
    pub(crate) async fn find_active_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(FIND_ACTIVE_BY_CODE_SQL)
            .bind(code.trim().to_uppercase())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lookup regardless of status, for admin order views.
    pub(crate) async fn find_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(FIND_BY_CODE_SQL)
            .bind(code.trim().to_uppercase())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(GET_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(LIST_PROMOTIONS_SQL)
            .bind(search)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_PROMOTIONS_SQL)
            .bind(search)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: &NewPromotion,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(CREATE_PROMOTION_SQL)
            .bind(promotion.uuid.into_uuid())
            .bind(promotion.code.trim().to_uppercase())
            .bind(promotion.kind.as_str())
            .bind(try_amount_to_i64(promotion.value, "value")?)
            .bind(try_amount_to_i64(promotion.min_amount, "min_amount")?)
            .bind(try_optional_amount_to_i64(promotion.max_amount, "max_amount")?)
            .bind(i32::try_from(promotion.usage_limit).unwrap_or(i32::MAX))
            .bind(promotion.expires_at.map(SqlxTimestamp::from))
            .bind(promotion.free_shipping)
            .bind(i32::try_from(promotion.min_items).unwrap_or(i32::MAX))
            .bind(promotion.status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        update: &PromotionUpdate,
    ) -> Result<Option<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(UPDATE_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .bind(update.code.trim().to_uppercase())
            .bind(update.kind.as_str())
            .bind(try_amount_to_i64(update.value, "value")?)
            .bind(try_amount_to_i64(update.min_amount, "min_amount")?)
            .bind(try_optional_amount_to_i64(update.max_amount, "max_amount")?)
            .bind(i32::try_from(update.usage_limit).unwrap_or(i32::MAX))
            .bind(update.expires_at.map(SqlxTimestamp::from))
            .bind(update.free_shipping)
            .bind(i32::try_from(update.min_items).unwrap_or(i32::MAX))
            .bind(update.status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Atomic conditional increment: succeeds only while the promotion is
    /// active and under its usage limit. Zero rows affected means a
    /// concurrent redemption took the last use.
    pub(crate) async fn increment_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_USAGE_SQL)
            .bind(promotion.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        order: OrderUuid,
        phone: &str,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_USAGE_SQL)
            .bind(Uuid::now_v7())
            .bind(promotion.into_uuid())
            .bind(order.into_uuid())
            .bind(phone)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let value: i32 = row.try_get(col)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        let kind = PromotionKind::parse(&kind).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "kind".to_string(),
            source: format!("unknown promotion kind {kind:?}").into(),
        })?;

        let status: String = row.try_get("status")?;

        let status = PromotionStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown promotion status {status:?}").into(),
        })?;

        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            kind,
            value: try_get_amount(row, "value")?,
            min_amount: try_get_amount(row, "min_amount")?,
            max_amount: try_get_optional_amount(row, "max_amount")?,
            usage_limit: try_get_count(row, "usage_limit")?,
            usage_count: try_get_count(row, "usage_count")?,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            free_shipping: row.try_get("free_shipping")?,
            min_items: try_get_count(row, "min_items")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
