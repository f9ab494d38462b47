//! Errors

use davenport_app::domain::promotions::PromotionsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: PromotionsServiceError) -> StatusError {
    match error {
        PromotionsServiceError::Rejected(rejection) => {
            StatusError::bad_request().brief(rejection.to_string())
        }
        PromotionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Promotion code already exists")
        }
        PromotionsServiceError::NotFound => StatusError::not_found(),
        PromotionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid promotion payload")
        }
        PromotionsServiceError::Sql(source) => {
            error!("promotion storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
