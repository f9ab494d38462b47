//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, SessionTokens},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        promotions::{PgPromotionsService, PromotionsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub carts: Arc<dyn CartsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub orders: Arc<dyn OrdersService>,
    pub products: Arc<dyn ProductsService>,
    pub promotions: Arc<dyn PromotionsService>,
}

impl AppContext {
    /// Build application context from a database URL, running any pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(
        url: &str,
        session_secret: &str,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::run_migrations(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let db = Db::new(pool.clone());
        let tokens = SessionTokens::new(session_secret);

        Ok(Self {
            auth: Arc::new(PgAuthService::new(pool, tokens)),
            carts: Arc::new(PgCartsService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            promotions: Arc::new(PgPromotionsService::new(db)),
        })
    }
}
