//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::categories::{
        data::{CategoryUpdate, NewCategory, slugify},
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategoryUuid},
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    #[tracing::instrument(name = "categories.service.create_category", skip(self, category), err)]
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if category.name.trim().is_empty() {
            return Err(CategoriesServiceError::InvalidData);
        }

        let slug = slugify(&category.name);

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_category(&mut tx, &category, &slug)
            .await?;

        tx.commit().await?;

        info!(category_uuid = %created.uuid, "created category");

        Ok(created)
    }

    #[tracing::instrument(name = "categories.service.update_category", skip(self, update), err)]
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if update.name.trim().is_empty() {
            return Err(CategoriesServiceError::InvalidData);
        }

        let slug = slugify(&update.name);

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_category(&mut tx, category, &update, &slug)
            .await?
            .ok_or(CategoriesServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "categories.service.delete_category", skip(self), err)]
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a new category; the slug derives from the name.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Updates a category with the given UUID.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Deletes a category with the given UUID.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            description: None,
            image: None,
            parent_uuid: None,
        }
    }

    #[tokio::test]
    async fn create_category_derives_slug_from_name() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(new_category("Living Room"))
            .await?;

        assert_eq!(category.slug, "living-room");

        Ok(())
    }

    #[tokio::test]
    async fn create_category_duplicate_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(new_category("Sofas"))
            .await?;

        let result = ctx.categories.create_category(new_category("Sofas")).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_category_blank_name_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.create_category(new_category("   ")).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_categories_is_ordered_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(new_category("Tables"))
            .await?;

        ctx.categories
            .create_category(new_category("Beds"))
            .await?;

        let categories = ctx.categories.list_categories().await?;

        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["Beds", "Tables"]);

        Ok(())
    }

    #[tokio::test]
    async fn update_category_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .update_category(
                CategoryUuid::new(),
                CategoryUpdate {
                    name: "Chairs".to_string(),
                    description: None,
                    image: None,
                    parent_uuid: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_category_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(new_category("Desks"))
            .await?;

        ctx.categories.delete_category(category.uuid).await?;

        let result = ctx.categories.get_category(category.uuid).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
