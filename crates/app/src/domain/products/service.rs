//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        pagination::{Page, PageRequest},
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

/// Upper bound on storefront search results, mirroring the public search
/// endpoint's default.
const MAX_SEARCH_RESULTS: u32 = 50;

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn search_products(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        if term.trim().is_empty() {
            return Ok(vec![]);
        }

        let limit = limit.clamp(1, MAX_SEARCH_RESULTS);

        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .search_products(&mut tx, term.trim(), i64::from(limit))
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_products(&mut tx, &filter, page).await?;
        let total = self.repository.count_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or(0),
            page: page.page,
            per_page: page.per_page,
        })
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(name = "products.service.create_product", skip(self, product), err)]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() || product.slug.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    #[tracing::instrument(name = "products.service.update_product", skip(self, update), err)]
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if update.name.trim().is_empty() || update.slug.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "products.service.delete_product", skip(self), err)]
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Storefront search over live products by name or slug.
    async fn search_products(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Paginated admin listing with optional search and category filter.
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single live product.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single live product by its slug.
    async fn get_product_by_slug(&self, slug: &str)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Updates a product with the given UUID.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: "Oak Bookshelf".to_string(),
                slug: "oak-bookshelf".to_string(),
                description: Some("Five shelves".to_string()),
                image: None,
                price: 1_200_000,
                sale_price: Some(990_000),
                category_uuid: None,
            })
            .await?;

        assert_eq!(product.name, "Oak Bookshelf");
        assert_eq!(product.price, 1_200_000);
        assert_eq!(product.sale_price, Some(990_000));
        assert_eq!(product.effective_price(), 990_000);
        assert!(product.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_product("oak-table", 100_000).await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: "Oak Table".to_string(),
                slug: "oak-table".to_string(),
                description: None,
                image: None,
                price: 200_000,
                sale_price: None,
                category_uuid: None,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn search_products_matches_name_and_slug() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_product("walnut-desk", 100_000).await?;
        ctx.create_product("pine-wardrobe", 200_000).await?;

        let products = ctx.products.search_products("walnut", 10).await?;

        assert_eq!(products.len(), 1, "expected a single match");
        assert_eq!(products[0].slug, "walnut-desk");

        Ok(())
    }

    #[tokio::test]
    async fn search_products_blank_term_returns_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_product("walnut-desk", 100_000).await?;

        let products = ctx.products.search_products("   ", 10).await?;

        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn deleted_product_not_searchable_or_fetchable() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.create_product("walnut-desk", 100_000).await?;

        ctx.products.delete_product(product.uuid).await?;

        let found = ctx.products.search_products("walnut", 10).await?;
        assert!(found.is_empty(), "deleted product should not match search");

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_paginates_with_total() -> TestResult {
        let ctx = TestContext::new().await;

        for index in 0..3 {
            ctx.create_product(&format!("chair-{index}"), 50_000).await?;
        }

        let page = ctx
            .products
            .list_products(ProductFilter::default(), PageRequest::new(Some(1), Some(2)))
            .await?;

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages(), 2);

        Ok(())
    }
}
