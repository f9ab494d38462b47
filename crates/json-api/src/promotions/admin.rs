//! Admin promotion endpoints.

use std::sync::Arc;

use jiff::Timestamp;
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
    pagination::PageRequest,
    promotions::{
        data::{NewPromotion, PromotionUpdate},
        records::{PromotionKind, PromotionRecord, PromotionStatus, PromotionUuid},
    },
};

use crate::{extensions::*, promotions::errors::into_status_error, state::State};

/// Promotion payload accepted by create and update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionRequest {
    pub code: String,
    /// "percent" or "fixed"
    pub kind: String,
    pub value: u64,
    #[serde(default)]
    pub min_amount: u64,
    pub max_amount: Option<u64>,
    #[serde(default)]
    pub usage_limit: u32,
    /// RFC 3339 timestamp; omitted means the code never expires
    pub expires_at: Option<String>,
    #[serde(default)]
    pub free_shipping: bool,
    #[serde(default)]
    pub min_items: u32,
    /// "active" or "inactive"; defaults to active
    pub status: Option<String>,
}

struct ParsedPromotionRequest {
    code: String,
    kind: PromotionKind,
    value: u64,
    min_amount: u64,
    max_amount: Option<u64>,
    usage_limit: u32,
    expires_at: Option<Timestamp>,
    free_shipping: bool,
    min_items: u32,
    status: PromotionStatus,
}

impl PromotionRequest {
    fn parse(self) -> Result<ParsedPromotionRequest, StatusError> {
        let kind = PromotionKind::parse(&self.kind)
            .ok_or_else(|| StatusError::bad_request().brief("Unknown promotion kind"))?;

        let status = match &self.status {
            Some(status) => PromotionStatus::parse(status)
                .ok_or_else(|| StatusError::bad_request().brief("Unknown promotion status"))?,
            None => PromotionStatus::Active,
        };

        let expires_at = self
            .expires_at
            .as_deref()
            .map(str::parse::<Timestamp>)
            .transpose()
            .or_400("Could not parse expires_at")?;

        Ok(ParsedPromotionRequest {
            code: self.code,
            kind,
            value: self.value,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            usage_limit: self.usage_limit,
            expires_at,
            free_shipping: self.free_shipping,
            min_items: self.min_items,
            status,
        })
    }
}

/// Promotion Body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionBody {
    pub uuid: Uuid,
    pub code: String,
    pub kind: String,
    pub value: u64,
    pub min_amount: u64,
    pub max_amount: Option<u64>,
    pub usage_limit: u32,
    pub usage_count: u32,
    pub expires_at: Option<String>,
    pub free_shipping: bool,
    pub min_items: u32,
    pub status: String,
    pub created_at: String,
}

impl From<PromotionRecord> for PromotionBody {
    fn from(promotion: PromotionRecord) -> Self {
        Self {
            uuid: promotion.uuid.into_uuid(),
            code: promotion.code,
            kind: promotion.kind.as_str().to_string(),
            value: promotion.value,
            min_amount: promotion.min_amount,
            max_amount: promotion.max_amount,
            usage_limit: promotion.usage_limit,
            usage_count: promotion.usage_count,
            expires_at: promotion.expires_at.as_ref().map(ToString::to_string),
            free_shipping: promotion.free_shipping,
            min_items: promotion.min_items,
            status: promotion.status.as_str().to_string(),
            created_at: promotion.created_at.to_string(),
        }
    }
}

/// Paginated promotion listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionsPageResponse {
    pub promotions: Vec<PromotionBody>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

/// List Promotions Handler
#[endpoint(tags("admin"), summary = "List Promotions", security(("session" = [])))]
pub(crate) async fn index(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PromotionsPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let listing = state
        .app
        .promotions
        .list_promotions(
            search.into_inner(),
            PageRequest::new(page.into_inner(), per_page.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(PromotionsPageResponse {
        total_pages: listing.total_pages(),
        total: listing.total,
        page: listing.page,
        per_page: listing.per_page,
        promotions: listing.items.into_iter().map(Into::into).collect(),
    }))
}

/// Create Promotion Handler
#[endpoint(tags("admin"), summary = "Create Promotion", security(("session" = [])))]
pub(crate) async fn create(
    json: JsonBody<PromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner().parse()?;

    let created = state
        .app
        .promotions
        .create_promotion(NewPromotion {
            uuid: PromotionUuid::new(),
            code: request.code,
            kind: request.kind,
            value: request.value,
            min_amount: request.min_amount,
            max_amount: request.max_amount,
            usage_limit: request.usage_limit,
            expires_at: request.expires_at,
            free_shipping: request.free_shipping,
            min_items: request.min_items,
            status: request.status,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

/// Get Promotion Handler
#[endpoint(tags("admin"), summary = "Get Promotion", security(("session" = [])))]
pub(crate) async fn get(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromotionBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let record = state
        .app
        .promotions
        .get_promotion(PromotionUuid::from_uuid(promotion.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}

/// Update Promotion Handler
#[endpoint(tags("admin"), summary = "Update Promotion", security(("session" = [])))]
pub(crate) async fn update(
    promotion: PathParam<Uuid>,
    json: JsonBody<PromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<PromotionBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner().parse()?;

    let updated = state
        .app
        .promotions
        .update_promotion(
            PromotionUuid::from_uuid(promotion.into_inner()),
            PromotionUpdate {
                code: request.code,
                kind: request.kind,
                value: request.value,
                min_amount: request.min_amount,
                max_amount: request.max_amount,
                usage_limit: request.usage_limit,
                expires_at: request.expires_at,
                free_shipping: request.free_shipping,
                min_items: request.min_items,
                status: request.status,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

/// Delete Promotion Handler
#[endpoint(tags("admin"), summary = "Delete Promotion", security(("session" = [])))]
pub(crate) async fn delete(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .promotions
        .delete_promotion(PromotionUuid::from_uuid(promotion.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
