//! Storefront promotion handlers.

pub(crate) mod validate;
