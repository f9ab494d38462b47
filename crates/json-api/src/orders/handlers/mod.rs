//! Storefront order handlers.

pub(crate) mod create;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use davenport_app::domain::orders::records::{OrderItemDetail, OrderRecord};

/// Order Body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderBody {
    pub uuid: Uuid,
    pub code: String,
    pub status: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub province_id: Option<i32>,
    pub district_id: Option<i32>,
    pub commune_id: Option<i32>,
    pub amount: u64,
    pub discount: u64,
    pub shipping_fee: u64,
    pub promotion_code: Option<String>,
    pub note: Option<String>,
    pub created_at: String,
}

impl From<OrderRecord> for OrderBody {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            code: order.code,
            status: order.status.as_str().to_string(),
            name: order.name,
            phone: order.phone,
            email: order.email,
            address: order.address,
            province_id: order.province_id,
            district_id: order.district_id,
            commune_id: order.commune_id,
            amount: order.amount,
            discount: order.discount,
            shipping_fee: order.shipping_fee,
            promotion_code: order.promotion_code,
            note: order.note,
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order Item Body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemBody {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_slug: String,
    pub product_name: String,
    pub product_image: Option<String>,
    pub unit_price: u64,
    pub quantity: u32,
    pub amount: u64,
}

impl From<OrderItemDetail> for OrderItemBody {
    fn from(item: OrderItemDetail) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_slug: item.product_slug,
            product_name: item.product_name,
            product_image: item.product_image,
            unit_price: item.unit_price,
            quantity: item.quantity,
            amount: item.amount,
        }
    }
}
