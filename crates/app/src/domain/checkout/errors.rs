//! Checkout service errors.

use souq::calculator::DiscountError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("amounts must not be negative")]
    NegativeAmount,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid tier pattern")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Discount(#[from] DiscountError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
