//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use davenport_app::auth::Credentials;

use crate::{
    auth::{errors::into_status_error, handlers::UserBody, session_cookie},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    pub user: UserBody,
    pub token: String,
}

/// Login Handler
///
/// Verifies credentials, merges any guest cart into the user's cart, and sets
/// the session cookie.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let authenticated = state
        .app
        .auth
        .login(Credentials {
            email: request.email,
            password: request.password,
        })
        .await
        .map_err(into_status_error)?;

    // Best-effort: a failed merge must never block the login itself.
    if let Some(session) = req
        .cookie(CART_SESSION_COOKIE)
        .and_then(|cookie| uuid::Uuid::parse_str(cookie.value()).ok())
        && let Err(error) = state
            .app
            .carts
            .merge_on_auth(session, authenticated.user.uuid)
            .await
    {
        warn!(user_uuid = %authenticated.user.uuid, "guest cart merge failed: {error}");
    }

    res.add_cookie(session_cookie(authenticated.token.clone()));

    Ok(Json(LoginResponse {
        user: authenticated.user.into(),
        token: authenticated.token,
    }))
}
