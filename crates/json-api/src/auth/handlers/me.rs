//! Current User Handler

use salvo::prelude::*;

use crate::{auth::handlers::UserBody, extensions::*};

/// Current User Handler
///
/// Returns the authenticated account.
#[endpoint(tags("auth"), summary = "Current User", security(("session" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserBody>, StatusError> {
    let user = depot.current_user_or_401()?;

    Ok(Json(user.clone().into()))
}
