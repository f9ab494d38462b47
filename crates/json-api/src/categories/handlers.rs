//! Storefront category handlers.

use std::sync::Arc;

use salvo::prelude::*;

use crate::{categories::CategoryBody, extensions::*, state::State};

/// List Categories Handler
///
/// The storefront navigation's category listing.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<Vec<CategoryBody>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .or_500("failed to fetch categories")?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use davenport_app::domain::categories::{
        MockCategoriesService,
        records::{CategoryRecord, CategoryUuid},
    };

    use crate::test_helpers::{TestServices, service_with};

    use super::*;

    #[tokio::test]
    async fn index_returns_categories() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories.expect_list_categories().once().return_once(|| {
            Ok(vec![CategoryRecord {
                uuid: CategoryUuid::new(),
                name: "Sofas".to_string(),
                slug: "sofas".to_string(),
                description: None,
                image: None,
                parent_uuid: None,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            }])
        });

        let mut services = TestServices::default();
        services.categories = categories;

        let service = service_with(services, Router::with_path("categories").get(index));

        let body: Vec<CategoryBody> = TestClient::get("http://example.com/categories")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.len(), 1);
        assert_eq!(body[0].slug, "sofas");

        Ok(())
    }
}
