//! App Router

use salvo::Router;

use crate::{auth, carts, categories, healthcheck, orders, products, promotions};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::handlers::register::handler))
                .push(Router::with_path("login").post(auth::handlers::login::handler))
                .push(
                    Router::new()
                        .hoop(auth::middleware::require_user)
                        .push(Router::with_path("me").get(auth::handlers::me::handler))
                        .push(Router::with_path("profile").put(auth::handlers::profile::handler)),
                ),
        )
        .push(
            Router::with_path("cart")
                .post(carts::handlers::add_item::handler)
                .get(carts::handlers::get::handler)
                .push(
                    Router::with_path("items/{item}")
                        .put(carts::handlers::update_item::handler)
                        .delete(carts::handlers::remove_item::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .post(orders::handlers::create::handler)
                .push(
                    Router::new()
                        .hoop(auth::middleware::require_user)
                        .get(orders::handlers::index::handler),
                ),
        )
        .push(Router::with_path("promotions/validate").post(promotions::handlers::validate::handler))
        .push(
            Router::with_path("products")
                .push(Router::with_path("search").get(products::handlers::search::handler))
                .push(Router::with_path("{slug}").get(products::handlers::get::handler)),
        )
        .push(Router::with_path("categories").get(categories::handlers::index))
        .push(
            Router::with_path("admin")
                .hoop(auth::middleware::require_admin)
                .push(
                    Router::with_path("products")
                        .get(products::admin::index)
                        .post(products::admin::create)
                        .push(
                            Router::with_path("{product}")
                                .put(products::admin::update)
                                .delete(products::admin::delete),
                        ),
                )
                .push(
                    Router::with_path("categories")
                        .post(categories::admin::create)
                        .push(
                            Router::with_path("{category}")
                                .put(categories::admin::update)
                                .delete(categories::admin::delete),
                        ),
                )
                .push(
                    Router::with_path("promotions")
                        .get(promotions::admin::index)
                        .post(promotions::admin::create)
                        .push(
                            Router::with_path("{promotion}")
                                .get(promotions::admin::get)
                                .put(promotions::admin::update)
                                .delete(promotions::admin::delete),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::admin::index)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::admin::get)
                                .push(Router::with_path("status").patch(orders::admin::update_status)),
                        ),
                ),
        )
}
