//! Promotions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        pagination::{Page, PageRequest},
        promotions::{
            data::{NewPromotion, PromotionUpdate},
            errors::PromotionsServiceError,
            records::{PromotionKind, PromotionQuote, PromotionRecord, PromotionUuid},
            repository::PgPromotionsRepository,
            validation::{self, PromotionRejection},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
        }
    }
}

fn check_promotion_value(kind: PromotionKind, value: u64) -> Result<(), PromotionsServiceError> {
    match kind {
        // Percent promotions are a share of the subtotal; 0 and 100+ are
        // configuration mistakes.
        PromotionKind::Percent if !(1..=99).contains(&value) => {
            Err(PromotionsServiceError::InvalidData)
        }
        PromotionKind::Fixed if value == 0 => Err(PromotionsServiceError::InvalidData),
        _ => Ok(()),
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    async fn validate_code(
        &self,
        code: &str,
        subtotal: u64,
    ) -> Result<PromotionQuote, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotion = self.repository.find_active_by_code(&mut tx, code).await?;

        tx.commit().await?;

        let promotion = promotion
            .ok_or(PromotionsServiceError::Rejected(PromotionRejection::UnknownCode))?;

        let discount = validation::evaluate(&promotion, subtotal, Timestamp::now())
            .map_err(PromotionsServiceError::Rejected)?;

        Ok(PromotionQuote {
            code: promotion.code,
            kind: promotion.kind,
            value: promotion.value,
            discount,
        })
    }

    #[tracing::instrument(name = "promotions.service.create_promotion", skip(self, promotion), err)]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        if promotion.code.trim().is_empty() {
            return Err(PromotionsServiceError::InvalidData);
        }

        check_promotion_value(promotion.kind, promotion.value)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_promotion(&mut tx, &promotion).await?;

        tx.commit().await?;

        info!(promotion_uuid = %created.uuid, code = %created.code, "created promotion");

        Ok(created)
    }

    #[tracing::instrument(name = "promotions.service.update_promotion", skip(self, update), err)]
    async fn update_promotion(
        &self,
        promotion: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        if update.code.trim().is_empty() {
            return Err(PromotionsServiceError::InvalidData);
        }

        check_promotion_value(update.kind, update.value)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_promotion(&mut tx, promotion, &update)
            .await?
            .ok_or(PromotionsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "promotions.service.delete_promotion", skip(self), err)]
    async fn delete_promotion(&self, promotion: PromotionUuid) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_promotion(&mut tx, promotion).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotion = self.repository.get_promotion(&mut tx, promotion).await?;

        tx.commit().await?;

        Ok(promotion)
    }

    async fn list_promotions(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Page<PromotionRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_promotions(&mut tx, search.as_deref(), page)
            .await?;

        let total = self
            .repository
            .count_promotions(&mut tx, search.as_deref())
            .await?;

        tx.commit().await?;

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or(0),
            page: page.page,
            per_page: page.per_page,
        })
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Resolve a code (case-insensitively) and compute the discount it grants
    /// against the given subtotal. Inapplicable codes come back as
    /// [`PromotionsServiceError::Rejected`] with a user-facing reason.
    async fn validate_code(
        &self,
        code: &str,
        subtotal: u64,
    ) -> Result<PromotionQuote, PromotionsServiceError>;

    /// Creates a new promotion; percent values must be 1..=99.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Updates a promotion with the given UUID.
    async fn update_promotion(
        &self,
        promotion: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Deletes a promotion with the given UUID.
    async fn delete_promotion(&self, promotion: PromotionUuid)
    -> Result<(), PromotionsServiceError>;

    /// Retrieve a single promotion.
    async fn get_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Paginated admin listing with optional code search.
    async fn list_promotions(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Page<PromotionRecord>, PromotionsServiceError>;
}
