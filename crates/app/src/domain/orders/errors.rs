//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::promotions::validation::PromotionRejection;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart not found")]
    CartNotFound,

    #[error("cart is empty")]
    CartEmpty,

    /// The supplied promotion code failed re-validation at checkout.
    #[error(transparent)]
    Promotion(PromotionRejection),

    /// The cart was consumed by a concurrent checkout. Retryable.
    #[error("order was already placed from this cart")]
    CartConflict,

    /// A concurrent redemption took the promotion's last use between
    /// validation and increment. Retryable.
    #[error("promotion code was exhausted by a concurrent order")]
    PromotionConflict,

    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
