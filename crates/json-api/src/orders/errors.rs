//! Errors

use davenport_app::domain::orders::OrdersServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::CartNotFound => StatusError::bad_request().brief("Cart not found"),
        OrdersServiceError::CartEmpty => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::Promotion(rejection) => {
            StatusError::bad_request().brief(rejection.to_string())
        }
        OrdersServiceError::CartConflict | OrdersServiceError::PromotionConflict => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Missing required shipping fields")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
