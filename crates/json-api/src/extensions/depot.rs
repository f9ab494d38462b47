//! Depot helper extensions.

use std::any::Any;

use davenport_app::domain::users::records::UserRecord;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The authenticated user placed in the depot by the auth middleware.
    fn current_user_or_401(&self) -> Result<&UserRecord, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn current_user_or_401(&self) -> Result<&UserRecord, StatusError> {
        self.obtain::<UserRecord>()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
