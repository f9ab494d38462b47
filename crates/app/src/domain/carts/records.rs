//! Cart Records

use jiff::Timestamp;

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub status: CartStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart lifecycle status. A cart is `Pending` from its lazy creation until an
/// order is placed from it, after which it is `Ordered` and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    Pending,
    Ordered,
}

impl CartStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ordered => "ordered",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "ordered" => Some(Self::Ordered),
            _ => None,
        }
    }
}

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    /// Unit price captured when the item was added; never re-read from the
    /// live product row.
    pub unit_price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart line joined with display fields from the live product row.
#[derive(Debug, Clone)]
pub struct CartItemDetail {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub price: u64,
    pub sale_price: Option<u64>,
}

/// What the storefront sees: the total item quantity, and the lines when
/// detail was requested.
#[derive(Debug, Clone)]
pub struct CartView {
    pub count: u64,
    pub items: Option<Vec<CartItemDetail>>,
}

impl CartView {
    #[must_use]
    pub fn empty(detail: bool) -> Self {
        Self {
            count: 0,
            items: detail.then(Vec::new),
        }
    }
}
