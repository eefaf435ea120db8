//! Delete Offer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, offers::errors::into_status_error, state::State};

/// Delete Offer Handler
///
/// Offers with recorded usage cannot be deleted.
#[endpoint(
    tags("offers"),
    summary = "Delete Offer",
    responses(
        (status_code = StatusCode::OK, description = "Offer deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::CONFLICT, description = "Offer has recorded usage"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .offers
        .delete_offer(offer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
