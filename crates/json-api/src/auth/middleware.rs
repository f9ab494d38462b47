//! Auth middleware.

use std::sync::Arc;

use davenport_app::{
    auth::AuthServiceError,
    domain::users::records::{UserRecord, UserRole},
};
use salvo::prelude::*;
use tracing::error;

use crate::{extensions::session_token, state::State};

/// Require a valid session; the resolved user lands in the depot.
#[salvo::handler]
pub(crate) async fn require_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if authenticate_into_depot(req, depot, res).await {
        ctrl.call_next(req, depot, res).await;
    }
}

/// Require a valid session belonging to an administrator.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if !authenticate_into_depot(req, depot, res).await {
        return;
    }

    let is_admin = depot
        .obtain::<UserRecord>()
        .map(|user| user.role == UserRole::Admin)
        .unwrap_or(false);

    if !is_admin {
        res.render(StatusError::unauthorized().brief("Unauthorized"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

async fn authenticate_into_depot(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> bool {
    let Some(token) = session_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing session token"));

        return false;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return false;
        }
    };

    match state.app.auth.authenticate(&token).await {
        Ok(user) => {
            depot.inject(user);

            true
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to authenticate session: {source}");

            res.render(StatusError::internal_server_error());

            false
        }
        Err(_rejected) => {
            res.render(StatusError::unauthorized().brief("Invalid session"));

            false
        }
    }
}
