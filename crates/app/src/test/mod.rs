//! Test infrastructure and shared fixtures.

mod db;

pub(crate) use context::TestContext;

use crate::domain::{
    orders::data::NewOrder,
    promotions::{
        data::NewPromotion,
        records::{PromotionKind, PromotionStatus, PromotionUuid},
    },
};

/// A promotion with open eligibility; tests tighten individual gates.
pub(crate) fn promotion(code: &str, kind: PromotionKind, value: u64) -> NewPromotion {
    NewPromotion {
        uuid: PromotionUuid::new(),
        code: code.to_string(),
        kind,
        value,
        min_amount: 0,
        max_amount: None,
        usage_limit: 0,
        expires_at: None,
        free_shipping: false,
        min_items: 0,
        status: PromotionStatus::Active,
    }
}

/// Valid checkout shipping details, optionally carrying a promotion code.
pub(crate) fn shipping_info(promotion_code: Option<&str>) -> NewOrder {
    NewOrder {
        name: "Shopper".to_string(),
        phone: "0900000001".to_string(),
        email: "shopper@example.com".to_string(),
        address: "12 Elm Street".to_string(),
        province_id: Some(1),
        district_id: Some(5),
        commune_id: Some(42),
        note: None,
        promotion_code: promotion_code.map(str::to_string),
    }
}
