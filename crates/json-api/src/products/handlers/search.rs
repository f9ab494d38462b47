//! Product Search Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{extensions::*, products::ProductBody, state::State};

const DEFAULT_LIMIT: u32 = 10;

/// Product Search Handler
///
/// Storefront search over live products by name or slug.
#[endpoint(tags("products"), summary = "Search Products")]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductBody>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(term) = q.into_inner() else {
        return Ok(Json(vec![]));
    };

    let products = state
        .app
        .products
        .search_products(&term, limit.into_inner().unwrap_or(DEFAULT_LIMIT))
        .await
        .or_500("failed to search products")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
