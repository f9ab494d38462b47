//! Promotion Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// Promotion Record
#[derive(Debug, Clone)]
pub struct PromotionRecord {
    pub uuid: PromotionUuid,
    /// Stored upper-cased; lookups upper-case the probe.
    pub code: String,
    pub kind: PromotionKind,
    pub value: u64,
    /// Order-subtotal floor for eligibility.
    pub min_amount: u64,
    /// Cap on the computed discount; only meaningful for percent promotions.
    pub max_amount: Option<u64>,
    /// 0 = unlimited.
    pub usage_limit: u32,
    pub usage_count: u32,
    /// None = never expires.
    pub expires_at: Option<Timestamp>,
    /// Display hint for the cart UI; not enforced during validation.
    pub free_shipping: bool,
    /// Display hint for the cart UI; not enforced during validation.
    pub min_items: u32,
    pub status: PromotionStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// How the discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionKind {
    Percent,
    Fixed,
}

impl PromotionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Fixed => "fixed",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "percent" => Some(Self::Percent),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }
}

/// Whether the code is redeemable at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionStatus {
    Active,
    Inactive,
}

impl PromotionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// The validator's successful outcome, echoed to clients for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionQuote {
    pub code: String,
    pub kind: PromotionKind,
    pub value: u64,
    pub discount: u64,
}
