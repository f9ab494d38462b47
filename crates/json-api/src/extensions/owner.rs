//! Resolving the request's cart/order owner.

use davenport_app::domain::{owner::OwnerContext, users::records::UserRecord};
use salvo::{Request, http::header::AUTHORIZATION};
use uuid::Uuid;

use crate::state::State;

/// Session token cookie set by login/register.
pub(crate) const AUTH_COOKIE: &str = "auth_token";

/// Anonymous cart continuity cookie, minted on first add-to-cart.
pub(crate) const CART_SESSION_COOKIE: &str = "cart_session";

/// Who the request is shopping as.
#[derive(Debug)]
pub(crate) enum RequestOwner {
    User(UserRecord),
    Guest(Uuid),
    /// No valid session token and no cart cookie yet.
    Anonymous,
}

impl RequestOwner {
    pub(crate) fn owner_context(&self) -> Option<OwnerContext> {
        match self {
            Self::User(user) => Some(OwnerContext::User(user.uuid)),
            Self::Guest(session) => Some(OwnerContext::Guest(*session)),
            Self::Anonymous => None,
        }
    }
}

/// The session token from the `Authorization: Bearer` header, falling back to
/// the auth cookie the storefront sets.
pub(crate) fn session_token(req: &Request) -> Option<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let mut parts = value.splitn(2, ' ');
            let scheme = parts.next()?;
            let token = parts.next()?.trim();

            (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty())
                .then(|| token.to_string())
        });

    bearer.or_else(|| req.cookie(AUTH_COOKIE).map(|cookie| cookie.value().to_string()))
}

/// Resolve the caller: a valid session token wins; an invalid or absent token
/// falls back to the guest cart cookie, then to anonymous.
pub(crate) async fn resolve_owner(req: &Request, state: &State) -> RequestOwner {
    if let Some(token) = session_token(req)
        && let Ok(user) = state.app.auth.authenticate(&token).await
    {
        return RequestOwner::User(user);
    }

    req.cookie(CART_SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        .map_or(RequestOwner::Anonymous, RequestOwner::Guest)
}
