//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use davenport_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::MockCartsService,
        categories::MockCategoriesService,
        orders::MockOrdersService,
        products::MockProductsService,
        promotions::MockPromotionsService,
        users::records::{UserRecord, UserRole, UserUuid},
    },
};

use crate::state::State;

/// One mock per service; tests set expectations on the ones they exercise.
/// Unexpected calls on the rest panic, which is the point.
#[derive(Default)]
pub(crate) struct TestServices {
    pub(crate) auth: MockAuthService,
    pub(crate) carts: MockCartsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) orders: MockOrdersService,
    pub(crate) products: MockProductsService,
    pub(crate) promotions: MockPromotionsService,
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            auth: Arc::new(self.auth),
            carts: Arc::new(self.carts),
            categories: Arc::new(self.categories),
            orders: Arc::new(self.orders),
            products: Arc::new(self.products),
            promotions: Arc::new(self.promotions),
        }))
    }
}

/// A service wiring the mocks into the given route.
pub(crate) fn service_with(services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(services.into_state()))
            .push(route),
    )
}

pub(crate) fn make_user(role: UserRole) -> UserRecord {
    UserRecord {
        uuid: UserUuid::new(),
        name: "Test Shopper".to_string(),
        email: "shopper@example.com".to_string(),
        phone: "0900000001".to_string(),
        role,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
