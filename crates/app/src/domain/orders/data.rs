//! Order Data

/// New Order Data — the shipping details and optional promotion code a
/// checkout arrives with. Totals are never part of the input; they are
/// recomputed from the cart.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub province_id: Option<i32>,
    pub district_id: Option<i32>,
    pub commune_id: Option<i32>,
    pub note: Option<String>,
    pub promotion_code: Option<String>,
}
