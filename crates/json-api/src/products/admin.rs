//! Admin product endpoints.

use std::sync::Arc;

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
    categories::records::CategoryUuid,
    pagination::PageRequest,
    products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        records::ProductUuid,
    },
};

use crate::{extensions::*, products::{ProductBody, errors::into_status_error}, state::State};

/// Product payload accepted by create and update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: u64,
    pub sale_price: Option<u64>,
    pub category_uuid: Option<Uuid>,
}

/// Paginated product listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsPageResponse {
    pub products: Vec<ProductBody>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

/// List Products Handler
#[endpoint(tags("admin"), summary = "List Products", security(("session" = [])))]
pub(crate) async fn index(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    search: QueryParam<String, false>,
    category: QueryParam<Uuid, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let listing = state
        .app
        .products
        .list_products(
            ProductFilter {
                search: search.into_inner(),
                category_uuid: category.into_inner().map(CategoryUuid::from_uuid),
            },
            PageRequest::new(page.into_inner(), per_page.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsPageResponse {
        total_pages: listing.total_pages(),
        total: listing.total,
        page: listing.page,
        per_page: listing.per_page,
        products: listing.items.into_iter().map(Into::into).collect(),
    }))
}

/// Create Product Handler
#[endpoint(tags("admin"), summary = "Create Product", security(("session" = [])))]
pub(crate) async fn create(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let created = state
        .app
        .products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: request.name,
            slug: request.slug,
            description: request.description,
            image: request.image,
            price: request.price,
            sale_price: request.sale_price,
            category_uuid: request.category_uuid.map(CategoryUuid::from_uuid),
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

/// Update Product Handler
#[endpoint(tags("admin"), summary = "Update Product", security(("session" = [])))]
pub(crate) async fn update(
    product: PathParam<Uuid>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let updated = state
        .app
        .products
        .update_product(
            ProductUuid::from_uuid(product.into_inner()),
            ProductUpdate {
                name: request.name,
                slug: request.slug,
                description: request.description,
                image: request.image,
                price: request.price,
                sale_price: request.sale_price,
                category_uuid: request.category_uuid.map(CategoryUuid::from_uuid),
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

/// Delete Product Handler
#[endpoint(tags("admin"), summary = "Delete Product", security(("session" = [])))]
pub(crate) async fn delete(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .products
        .delete_product(ProductUuid::from_uuid(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use davenport_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductRecord,
    };

    use crate::test_helpers::{TestServices, service_with};

    use super::*;

    fn make_service(products: MockProductsService, route: Router) -> Service {
        let mut services = TestServices::default();
        services.products = products;

        service_with(services, route)
    }

    #[tokio::test]
    async fn create_returns_201() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new_product| new_product.slug == "oak-table" && new_product.price == 100_000)
            .return_once(|new_product| {
                Ok(ProductRecord {
                    uuid: new_product.uuid,
                    name: new_product.name,
                    slug: new_product.slug,
                    description: new_product.description,
                    image: new_product.image,
                    price: new_product.price,
                    sale_price: new_product.sale_price,
                    category_uuid: new_product.category_uuid,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                    deleted_at: None,
                })
            });

        let service = make_service(products, Router::with_path("admin/products").post(create));

        let res = TestClient::post("http://example.com/admin/products")
            .json(&json!({ "name": "Oak Table", "slug": "oak-table", "price": 100_000 }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let service = make_service(
            products,
            Router::with_path("admin/products/{product}").delete(delete),
        );

        let res = TestClient::delete(format!(
            "http://example.com/admin/products/{}",
            Uuid::now_v7()
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
