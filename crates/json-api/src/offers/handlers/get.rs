//! Get Offer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OfferResponse},
    state::State,
};

/// Get Offer Handler
///
/// Returns an offer.
#[endpoint(
    tags("offers"),
    summary = "Get Offer",
    responses(
        (status_code = StatusCode::OK, description = "Offer found"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let offer = state
        .app
        .offers
        .get_offer(offer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(offer.into()))
}
