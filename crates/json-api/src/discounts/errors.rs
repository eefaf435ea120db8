//! Discount Errors

use salvo::http::StatusError;
use tracing::error;

use souq_app::domain::checkout::CheckoutServiceError;

/// Map a checkout failure, answering infrastructure problems with `retry`.
pub(crate) fn into_status_error(error: CheckoutServiceError, retry: &str) -> StatusError {
    match error {
        CheckoutServiceError::NegativeAmount => {
            StatusError::bad_request().brief("Amounts cannot be negative")
        }
        CheckoutServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid redemption payload")
        }
        CheckoutServiceError::Pattern(source) => {
            error!("failed to build tier code pattern: {source}");

            StatusError::internal_server_error().brief(retry)
        }
        CheckoutServiceError::Discount(source) => {
            error!("failed to calculate discount: {source}");

            StatusError::internal_server_error().brief(retry)
        }
        CheckoutServiceError::Sql(source) => {
            error!("checkout storage error: {source}");

            StatusError::internal_server_error().brief(retry)
        }
    }
}
