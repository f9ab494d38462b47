//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use davenport_app::auth::NewRegistration;

use crate::{
    auth::{errors::into_status_error, handlers::UserBody, session_cookie},
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Register Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterResponse {
    pub user: UserBody,
    pub token: String,
}

/// Register Handler
///
/// Creates a customer account, adopts any guest cart, and logs the new
/// account in.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing required fields"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisterResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let authenticated = state
        .app
        .auth
        .register(NewRegistration {
            name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
        })
        .await
        .map_err(into_status_error)?;

    // A brand-new account has no cart, so the merge reduces to adopting the
    // guest cart; still best-effort.
    if let Some(session) = req
        .cookie(CART_SESSION_COOKIE)
        .and_then(|cookie| uuid::Uuid::parse_str(cookie.value()).ok())
        && let Err(error) = state
            .app
            .carts
            .merge_on_auth(session, authenticated.user.uuid)
            .await
    {
        warn!(user_uuid = %authenticated.user.uuid, "guest cart adoption failed: {error}");
    }

    res.add_cookie(session_cookie(authenticated.token.clone()));
    res.status_code(StatusCode::CREATED);

    Ok(Json(RegisterResponse {
        user: authenticated.user.into(),
        token: authenticated.token,
    }))
}
