//! Cart handlers.

pub(crate) mod add_item;
pub(crate) mod get;
pub(crate) mod remove_item;
pub(crate) mod update_item;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// The running cart badge count returned by every cart mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartCountResponse {
    pub cart_count: u64,
}
