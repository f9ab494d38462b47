//! Promotion Data

use jiff::Timestamp;

use crate::domain::promotions::records::{PromotionKind, PromotionStatus, PromotionUuid};

/// New Promotion Data
#[derive(Debug, Clone)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub code: String,
    pub kind: PromotionKind,
    pub value: u64,
    pub min_amount: u64,
    pub max_amount: Option<u64>,
    pub usage_limit: u32,
    pub expires_at: Option<Timestamp>,
    pub free_shipping: bool,
    pub min_items: u32,
    pub status: PromotionStatus,
}

/// Promotion Update Data
#[derive(Debug, Clone)]
pub struct PromotionUpdate {
    pub code: String,
    pub kind: PromotionKind,
    pub value: u64,
    pub min_amount: u64,
    pub max_amount: Option<u64>,
    pub usage_limit: u32,
    pub expires_at: Option<Timestamp>,
    pub free_shipping: bool,
    pub min_items: u32,
    pub status: PromotionStatus,
}
