//! Profile Update Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use davenport_app::domain::users::data::ProfileUpdate;

use crate::{
    auth::{errors::into_status_error, handlers::UserBody},
    extensions::*,
    state::State,
};

/// Profile Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileRequest {
    pub name: String,
    pub phone: String,
}

/// Profile Update Handler
///
/// Updates the authenticated account's display name and phone number.
#[endpoint(tags("auth"), summary = "Update Profile", security(("session" = [])))]
pub(crate) async fn handler(
    json: JsonBody<ProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let request = json.into_inner();

    let updated = state
        .app
        .auth
        .update_profile(
            user.uuid,
            ProfileUpdate {
                name: request.name,
                phone: request.phone,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
