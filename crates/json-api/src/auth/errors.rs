//! Errors

use davenport_app::auth::AuthServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email already registered")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Missing required fields")
        }
        AuthServiceError::Token(_) => StatusError::unauthorized().brief("Invalid session"),
        AuthServiceError::NotFound => StatusError::not_found(),
        AuthServiceError::Hash(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
