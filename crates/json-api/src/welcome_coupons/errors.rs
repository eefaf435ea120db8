//! Welcome Coupon Errors

use salvo::http::StatusError;
use tracing::error;

use souq_app::domain::welcome_coupons::WelcomeCouponsServiceError;

pub(crate) fn into_status_error(error: WelcomeCouponsServiceError) -> StatusError {
    match error {
        WelcomeCouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A welcome coupon with this code already exists")
        }
        WelcomeCouponsServiceError::Invalid(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        WelcomeCouponsServiceError::InvalidReference
        | WelcomeCouponsServiceError::MissingRequiredData
        | WelcomeCouponsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid welcome coupon payload")
        }
        WelcomeCouponsServiceError::NotFound => {
            StatusError::not_found().brief("Welcome coupon not found")
        }
        WelcomeCouponsServiceError::Sql(source) => {
            error!("welcome coupon storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
