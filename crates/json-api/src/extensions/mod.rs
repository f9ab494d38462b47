//! Extension traits

mod depot;
mod owner;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use owner::{AUTH_COOKIE, CART_SESSION_COOKIE, resolve_owner, session_token};
pub(crate) use result::ResultExt as _;
