//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, promotions::records::PromotionRecord,
        users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record — an immutable checkout snapshot.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    /// Human-facing order code, unique across all orders.
    pub code: String,
    /// Absent for guest checkouts.
    pub user_uuid: Option<UserUuid>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub province_id: Option<i32>,
    pub district_id: Option<i32>,
    pub commune_id: Option<i32>,
    pub status: OrderStatus,
    /// Final payable total: subtotal - discount + shipping fee.
    pub amount: u64,
    pub discount: u64,
    pub shipping_fee: u64,
    pub promotion_code: Option<String>,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    ReadyToShip,
    Delivering,
    Finished,
    RequestRefund,
    Refunded,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::ReadyToShip => "ready_to_ship",
            Self::Delivering => "delivering",
            Self::Finished => "finished",
            Self::RequestRefund => "request_refund",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "processing" => Some(Self::Processing),
            "ready_to_ship" => Some(Self::ReadyToShip),
            "delivering" => Some(Self::Delivering),
            "finished" => Some(Self::Finished),
            "request_refund" => Some(Self::RequestRefund),
            "refunded" => Some(Self::Refunded),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Order Item Record — a per-line snapshot decoupled from live products.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_slug: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub amount: u64,
}

/// An order line joined with display fields from the live product row.
#[derive(Debug, Clone)]
pub struct OrderItemDetail {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_slug: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub amount: u64,
    pub product_name: String,
    pub product_image: Option<String>,
}

/// A customer's order with its lines.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: OrderRecord,
    pub items: Vec<OrderItemDetail>,
}

/// Admin order view: lines plus the promotion row behind `promotion_code`,
/// when one still exists.
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: OrderRecord,
    pub items: Vec<OrderItemDetail>,
    pub promotion: Option<PromotionRecord>,
}

/// The outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub uuid: OrderUuid,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::ReadyToShip,
            OrderStatus::Delivering,
            OrderStatus::Finished,
            OrderStatus::RequestRefund,
            OrderStatus::Refunded,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_does_not_parse() {
        assert_eq!(OrderStatus::parse("shipped"), None);
    }
}
