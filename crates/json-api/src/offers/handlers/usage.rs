//! Offer Usage Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OfferUsagesResponse},
    state::State,
};

/// Offer Usage Handler
///
/// Returns how often each customer has used an offer, most recent first.
#[endpoint(
    tags("offers"),
    summary = "Offer Usage",
    responses(
        (status_code = StatusCode::OK, description = "Usage ledger"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OfferUsagesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let usages = state
        .app
        .offers
        .list_offer_usages(offer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(usages.into()))
}
