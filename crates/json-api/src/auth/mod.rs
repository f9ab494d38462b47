//! Session authentication over cookies and bearer tokens.

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod middleware;

use salvo::http::cookie::{Cookie, SameSite, time::Duration};
use uuid::Uuid;

use crate::extensions::{AUTH_COOKIE, CART_SESSION_COOKIE};

/// The signed session cookie set by login and register.
pub(crate) fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::days(7))
        .build()
}

/// The anonymous cart continuity cookie, minted on first add-to-cart.
pub(crate) fn cart_session_cookie(session: Uuid) -> Cookie<'static> {
    Cookie::build((CART_SESSION_COOKIE, session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::days(30))
        .build()
}
