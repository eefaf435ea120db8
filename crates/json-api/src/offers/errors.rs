//! Offer Errors

use salvo::http::StatusError;
use tracing::error;

use souq_app::domain::offers::OffersServiceError;

pub(crate) fn into_status_error(error: OffersServiceError) -> StatusError {
    match error {
        OffersServiceError::AlreadyExists => StatusError::conflict().brief("Offer already exists"),
        OffersServiceError::InUse => {
            StatusError::conflict().brief("Offer has recorded usage and cannot be deleted")
        }
        OffersServiceError::Invalid(source) => StatusError::bad_request().brief(source.to_string()),
        OffersServiceError::InvalidReference
        | OffersServiceError::MissingRequiredData
        | OffersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid offer payload")
        }
        OffersServiceError::NotFound => StatusError::not_found().brief("Offer not found"),
        OffersServiceError::Sql(source) => {
            error!("offer storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use souq::offers::OfferError;

    use super::*;

    #[test]
    fn validation_errors_keep_their_message() {
        let error = into_status_error(OffersServiceError::Invalid(OfferError::NoTiers));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, OfferError::NoTiers.to_string());
    }

    #[test]
    fn in_use_offers_conflict() {
        assert_eq!(
            into_status_error(OffersServiceError::InUse).code,
            StatusCode::CONFLICT
        );
    }
}
